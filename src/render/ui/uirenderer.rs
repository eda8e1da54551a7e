//! The UI renderer for the debug overlay.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec4};

use super::font::Font;
use crate::{
    abs::{AttributeDescriptor, GlBackend, Mesh, ShaderProgram, Texture, VertexLayout},
    error::Error,
};

/// The rendering mode for a UI element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UIRenderMode {
    /// Sampled from the font atlas and tinted.
    Glyph(Vec4),
    Color(Vec4),
}

/// A draw command for rendering a UI element.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    pub rect: [Vec2; 2],
    pub uv_rect: [Vec2; 2],
    pub mode: UIRenderMode,
}

impl DrawCommand {
    /// A solid rectangle.
    pub fn solid(position: Vec2, size: Vec2, color: Vec4) -> Self {
        Self {
            rect: [position, position + size],
            uv_rect: [Vec2::ZERO, Vec2::ONE],
            mode: UIRenderMode::Color(color),
        }
    }

    pub fn translated(mut self, offset: Vec2) -> Self {
        self.rect[0] += offset;
        self.rect[1] += offset;
        self
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct UIVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl UIVertex {
    pub fn layout() -> VertexLayout {
        VertexLayout::new([
            AttributeDescriptor::float("a_position", 2),
            AttributeDescriptor::float("a_uv", 2),
        ])
    }
}

/// Screen-space projection with the origin at the top left corner.
pub fn screen_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}

/// Batches consecutive draw commands that share a render mode into one draw call.
pub struct UIRenderer<G: GlBackend = glow::Context> {
    shader_program: ShaderProgram<G>,
    mesh: Mesh<G>,
    atlas: Texture<G>,
    pub projection_matrix: Mat4,
    last_mode: Option<UIRenderMode>,
    vertices: Vec<UIVertex>,
    indices: Vec<u32>,
}

impl<G: GlBackend> UIRenderer<G> {
    /// Creates a new UI renderer for a viewport of the given size.
    pub fn new(gl: &Arc<G>, viewport: (u32, u32)) -> Result<Self, Error> {
        let shader_program = crate::shader_program!(ui, gl, "..")?;
        Self::with_program(gl, shader_program, viewport)
    }

    pub fn with_program(
        gl: &Arc<G>,
        shader_program: ShaderProgram<G>,
        viewport: (u32, u32),
    ) -> Result<Self, Error> {
        let mesh = Mesh::new::<UIVertex>(
            gl,
            &shader_program,
            &UIVertex::layout(),
            &[],
            &[],
            glow::DYNAMIC_DRAW,
        )?;
        let size = Font.atlas_size();
        let atlas = Texture::from_rgba(gl, size.x, size.y, &Font.atlas_rgba())?;

        Ok(Self {
            shader_program,
            mesh,
            atlas,
            projection_matrix: screen_projection(viewport.0, viewport.1),
            last_mode: None,
            vertices: Vec::new(),
            indices: Vec::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection_matrix = screen_projection(width, height);
    }

    /// Adds a draw command to the UI renderer.
    pub fn add_command(&mut self, command: DrawCommand) {
        // A change of mode flushes the batch built so far.
        if self.last_mode.is_some_and(|mode| mode != command.mode) {
            self.finish();
        }
        self.append_command(&command);
        self.last_mode = Some(command.mode);
    }

    pub fn add_commands(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        for command in commands {
            self.add_command(command);
        }
    }

    /// Finishes the current batch and draws it.
    pub fn finish(&mut self) {
        self.draw_mesh();
        self.vertices.clear();
        self.indices.clear();
        self.last_mode = None;
    }

    fn draw_mesh(&mut self) {
        let Some(mode) = self.last_mode else {
            return;
        };
        if self.indices.is_empty() {
            return;
        }

        self.mesh.update(&self.vertices, &self.indices);
        self.shader_program.use_program();
        self.shader_program
            .set_uniform("u_projection", self.projection_matrix);

        match mode {
            UIRenderMode::Glyph(color) => {
                self.atlas.bind(0);
                self.shader_program.set_uniform("u_tex", 0);
                self.shader_program.set_uniform("u_color", color);
                self.shader_program.set_uniform("u_solid", false);
            }
            UIRenderMode::Color(color) => {
                self.shader_program.set_uniform("u_color", color);
                self.shader_program.set_uniform("u_solid", true);
            }
        }

        self.mesh.draw();
    }

    /// Appends a draw command's vertices and indices to the current batch.
    fn append_command(&mut self, command: &DrawCommand) {
        let base_index = self.vertices.len() as u32;
        let [min, max] = command.rect;
        let [uv_min, uv_max] = command.uv_rect;

        self.vertices.extend([
            UIVertex {
                position: [max.x, min.y],
                uv: [uv_max.x, uv_min.y],
            },
            UIVertex {
                position: [min.x, min.y],
                uv: [uv_min.x, uv_min.y],
            },
            UIVertex {
                position: [min.x, max.y],
                uv: [uv_min.x, uv_max.y],
            },
            UIVertex {
                position: [max.x, max.y],
                uv: [uv_max.x, uv_max.y],
            },
        ]);
        self.indices.extend([
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::testing::{Call, RecordingBackend, UniformValue};

    fn renderer() -> (Arc<RecordingBackend>, UIRenderer<RecordingBackend>) {
        let gl = Arc::new(RecordingBackend::new());
        let renderer = UIRenderer::new(&gl, (640, 480)).unwrap();
        gl.clear_calls();
        (gl, renderer)
    }

    fn draws(gl: &RecordingBackend) -> Vec<i32> {
        gl.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DrawElements { count, .. } => Some(count),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn same_mode_commands_share_one_draw() {
        let (gl, mut ui) = renderer();
        let white = Vec4::ONE;
        ui.add_commands(Font.text("FPS", 12.0, white));
        ui.finish();

        assert_eq!(draws(&gl), vec![18]);
        assert_eq!(gl.uniform_uploads("u_solid"), vec![UniformValue::I32(0)]);
        assert_eq!(gl.uniform_uploads("u_tex"), vec![UniformValue::I32(0)]);
        // Four vertices of four floats per glyph.
        assert!(gl.calls().contains(&Call::BufferData {
            target: glow::ARRAY_BUFFER,
            len: 3 * 4 * 16,
            usage: glow::DYNAMIC_DRAW,
        }));
    }

    #[test]
    fn mode_change_flushes_the_batch() {
        let (gl, mut ui) = renderer();
        let panel = Vec4::new(0.0, 0.0, 0.0, 0.5);
        ui.add_command(DrawCommand::solid(Vec2::ZERO, Vec2::splat(10.0), panel));
        ui.add_commands(Font.text("OK", 12.0, Vec4::ONE));
        ui.add_command(DrawCommand::solid(Vec2::ZERO, Vec2::splat(4.0), panel));
        ui.finish();

        assert_eq!(draws(&gl), vec![6, 12, 6]);
        assert_eq!(
            gl.uniform_uploads("u_solid"),
            vec![
                UniformValue::I32(1),
                UniformValue::I32(0),
                UniformValue::I32(1)
            ]
        );
    }

    #[test]
    fn finishing_an_empty_batch_draws_nothing() {
        let (gl, mut ui) = renderer();
        ui.finish();
        assert!(draws(&gl).is_empty());
    }

    #[test]
    fn projection_follows_resize() {
        let (gl, mut ui) = renderer();
        ui.resize(200, 100);
        ui.add_command(DrawCommand::solid(Vec2::ZERO, Vec2::ONE, Vec4::ONE));
        ui.finish();

        let expected = screen_projection(200, 100);
        assert_eq!(
            gl.uniform_uploads("u_projection"),
            vec![UniformValue::Mat4(expected.to_cols_array())]
        );
        // The top left corner of the window maps to the top left of clip space.
        let corner = expected.transform_point3(glam::Vec3::ZERO);
        assert!(corner.abs_diff_eq(glam::Vec3::new(-1.0, 1.0, 0.0), 1e-6));
    }
}
