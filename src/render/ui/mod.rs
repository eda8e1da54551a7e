//! All UI related utilities.
//!
//! This module contains the pieces the debug overlay is drawn with: a built-in bitmap font,
//! a batching 2D renderer, and the label and slider widgets.

pub mod font;
pub mod uirenderer;
pub mod widgets;

pub use font::*;
pub use uirenderer::*;
