//! This module contains the core components for the rendering engine,
//! including application setup, the OpenGL backend, shader management, vertex layouts,
//! mesh handling and textures.

pub mod app;
pub mod backend;
pub mod layout;
pub mod mesh;
pub mod shader;
pub mod texture;

#[cfg(test)]
pub(crate) mod testing;

pub use app::*;
pub use backend::*;
pub use layout::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
