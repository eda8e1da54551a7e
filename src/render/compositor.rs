//! Composes one frame of the textured quad.

use std::{path::Path, sync::Arc};

use glam::{Mat4, Vec3, Vec4};

use super::{QUAD_INDICES, QUAD_VERTICES, quad_layout};
use crate::{
    abs::{GlBackend, Mesh, ShaderProgram, Texture, UniformSlot},
    camera::Camera,
    error::Error,
};

/// Degrees the quad spins around the Y axis per second.
const SPIN_RATE: f32 = 10.0;

/// The model transform at `time` seconds: a fixed 90° tilt, a spin around Y and a vertical
/// offset, pushed slightly away from the camera.
pub fn model_matrix(time: f32, offset: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, offset, -0.3))
        * Mat4::from_rotation_y((time * SPIN_RATE).to_radians())
        * Mat4::from_rotation_x(90.0f32.to_radians())
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(45.0f32.to_radians(), aspect, 0.1, 100.0)
}

/// Where the transform goes in the program.
pub enum TransformSlots<G: GlBackend = glow::Context> {
    /// One `transform` uniform holding projection · view · model.
    Combined(UniformSlot<G>),
    Separate {
        model: UniformSlot<G>,
        view: UniformSlot<G>,
        projection: UniformSlot<G>,
    },
    Missing,
}

impl<G: GlBackend> TransformSlots<G> {
    /// Resolves the slots once. `transform` wins over the separate matrices.
    pub fn resolve(program: &ShaderProgram<G>) -> Self {
        if let Some(transform) = program.uniform_slot("transform") {
            return TransformSlots::Combined(transform);
        }
        match (
            program.uniform_slot("model"),
            program.uniform_slot("view"),
            program.uniform_slot("projection"),
        ) {
            (Some(model), Some(view), Some(projection)) => TransformSlots::Separate {
                model,
                view,
                projection,
            },
            _ => {
                log::warn!(
                    "shader program declares neither `transform` nor `model`/`view`/`projection`"
                );
                TransformSlots::Missing
            }
        }
    }

    fn upload(&self, program: &ShaderProgram<G>, model: Mat4, view: Mat4, projection: Mat4) {
        match self {
            TransformSlots::Combined(transform) => {
                program.set_slot(transform, projection * view * model);
            }
            TransformSlots::Separate {
                model: model_slot,
                view: view_slot,
                projection: projection_slot,
            } => {
                program.set_slot(model_slot, model);
                program.set_slot(view_slot, view);
                program.set_slot(projection_slot, projection);
            }
            TransformSlots::Missing => {}
        }
    }
}

/// Owns the GPU resources of the scene and draws it.
///
/// Fields drop in declaration order: the program and its shaders, then the quad buffers and
/// vertex array, then the texture.
pub struct Compositor<G: GlBackend = glow::Context> {
    program: ShaderProgram<G>,
    slots: TransformSlots<G>,
    quad: Mesh<G>,
    texture: Texture<G>,
    gl: Arc<G>,
    background: Vec4,
    viewport: (u32, u32),
}

impl<G: GlBackend> Compositor<G> {
    /// Builds the quad program, uploads the quad and loads its texture.
    pub fn new(
        gl: &Arc<G>,
        texture_path: impl AsRef<Path>,
        background: Vec4,
        viewport: (u32, u32),
    ) -> Result<Self, Error> {
        let program = crate::shader_program!(quad, gl, ".")?;
        Self::with_program(gl, program, texture_path, background, viewport)
    }

    pub fn with_program(
        gl: &Arc<G>,
        program: ShaderProgram<G>,
        texture_path: impl AsRef<Path>,
        background: Vec4,
        viewport: (u32, u32),
    ) -> Result<Self, Error> {
        let quad = Mesh::new(
            gl,
            &program,
            &quad_layout(),
            &QUAD_VERTICES,
            &QUAD_INDICES,
            glow::STATIC_DRAW,
        )?;
        let texture = Texture::load(gl, texture_path)?;
        let slots = TransformSlots::resolve(&program);

        program.use_program();
        program.set_uniform("tex", 0);

        let mut compositor = Self {
            program,
            slots,
            quad,
            texture,
            gl: Arc::clone(gl),
            background,
            viewport,
        };
        compositor.resize(viewport.0, viewport.1);
        Ok(compositor)
    }

    /// Follows a new drawable size. Zero sizes are raised to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
        self.gl.viewport(0, 0, self.viewport.0 as i32, self.viewport.1 as i32);
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.0 as f32 / self.viewport.1 as f32
    }

    pub fn clear(&self) {
        let [r, g, b, a] = self.background.to_array();
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(glow::COLOR_BUFFER_BIT);
    }

    /// Draws the quad as seen from `camera` at `elapsed` seconds.
    pub fn draw(&self, camera: &Camera, elapsed: f32, offset: f32) {
        self.program.use_program();
        self.texture.bind(0);
        self.slots.upload(
            &self.program,
            model_matrix(elapsed, offset),
            camera.view_matrix(),
            projection_matrix(self.aspect()),
        );
        self.quad.draw();
    }
}
