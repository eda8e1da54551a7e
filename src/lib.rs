//! A small OpenGL viewer for one textured quad.
//!
//! The quad spins in front of a first-person camera driven from the keyboard, with a debug
//! overlay showing the frame rate and a slider for the quad's height.

pub mod abs;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod logging;
pub mod render;
pub mod viewer;

pub use error::Error;
