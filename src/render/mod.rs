//! Module for anything related to rendering.
//!
//! This module contains the frame compositor for the textured quad, the debug overlay and
//! the UI toolkit it is drawn with, and all used shaders.

use crate::abs::{AttributeDescriptor, VertexLayout};

pub mod compositor;
pub mod overlay;
pub mod ui;

pub use compositor::*;
pub use overlay::*;

/// Compiles and links the shader pair under `shaders/<name>/`, relative to `$path_prefix`
/// as seen from the calling file. Evaluates to a `Result<ShaderProgram, ShaderError>`.
#[macro_export]
macro_rules! shader_program {
    ($name:ident, $gl:expr, $path_prefix:literal) => {
        $crate::abs::ShaderProgram::build(
            &$gl,
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                $path_prefix,
                "/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
    };
}

/// The quad as interleaved `x, y, z, u, v` records.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 20] = [
    -0.5,  0.5, 0.0,   0.0, 0.0,
     0.5,  0.5, 0.0,   1.0, 0.0,
     0.5, -0.5, 0.0,   1.0, 1.0,
    -0.5, -0.5, 0.0,   0.0, 1.0,
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Layout of [`QUAD_VERTICES`].
pub fn quad_layout() -> VertexLayout {
    VertexLayout::new([
        AttributeDescriptor::float("pos", 3),
        AttributeDescriptor::float("texcoord", 2),
    ])
}
