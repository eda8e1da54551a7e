//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing indexed geometry on the GPU side.
//! Vertices are any plain-old-data type whose bytes match the [`VertexLayout`] the mesh is
//! created with.

use std::sync::Arc;

use bytemuck::Pod;

use super::{GlBackend, GlError, ShaderProgram, VertexLayout};

/// Represents an indexed triangle mesh stored on the GPU side.
pub struct Mesh<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    vao: G::VertexArray,
    vbo: G::Buffer,
    ebo: G::Buffer,
    usage: u32,
    index_count: usize,
}

impl<G: GlBackend> Mesh<G> {
    /// Uploads the vertex and index data and binds `layout` to the attributes of `program`.
    ///
    /// `usage` is the buffer usage hint, `glow::STATIC_DRAW` for geometry uploaded once.
    pub fn new<V: Pod>(
        gl: &Arc<G>,
        program: &ShaderProgram<G>,
        layout: &VertexLayout,
        vertices: &[V],
        indices: &[u32],
        usage: u32,
    ) -> Result<Self, GlError> {
        let vao = gl
            .create_vertex_array()
            .map_err(GlError::create("vertex array"))?;
        let vbo = gl.create_buffer().map_err(GlError::create("vertex buffer"))?;
        let ebo = gl.create_buffer().map_err(GlError::create("index buffer"))?;

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(vertices), usage);

        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            usage,
        );

        layout.bind(program);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        Ok(Self {
            gl: Arc::clone(gl),
            vao,
            vbo,
            ebo,
            usage,
            index_count: indices.len(),
        })
    }

    /// Replaces the vertex and index data.
    pub fn update<V: Pod>(&mut self, vertices: &[V], indices: &[u32]) {
        self.index_count = indices.len();

        self.gl.bind_vertex_array(Some(self.vao));
        self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
        self.gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(vertices),
            self.usage,
        );
        self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
        self.gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            self.usage,
        );

        self.gl.bind_vertex_array(None);
        self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
    }

    /// Draws the mesh as a list of triangles.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
        self.gl.draw_elements(
            glow::TRIANGLES,
            self.index_count as i32,
            glow::UNSIGNED_INT,
            0,
        );
        self.gl.bind_vertex_array(None);
    }

    // Returns the amount of of indices used in the mesh
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<G: GlBackend> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_buffer(self.ebo);
        self.gl.delete_vertex_array(self.vao);
    }
}
