//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for compiling and linking
//! GLSL sources. This module also provides the [`Uniform`] trait for setting uniform variables
//! in shader programs.
//!
//! Failures keep the diagnostic layout of the driver: a tagged category line followed by the
//! raw info log.

use std::{fmt, sync::Arc};

use glam::{Mat4, Vec2, Vec4};

use super::GlBackend;

/// The pipeline stage a shader is compiled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    /// Returns the OpenGL shader type of the stage.
    pub fn gl_type(self) -> u32 {
        match self {
            Stage::Vertex => glow::VERTEX_SHADER,
            Stage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Vertex => "VERTEX",
            Stage::Fragment => "FRAGMENT",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while building a shader program.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("ERROR::SHADER_COMPILATION_ERROR of type: {stage}\n{log}")]
    Compile { stage: Stage, log: String },
    #[error("ERROR::PROGRAM_LINKING_ERROR of type: PROGRAM\n{log}")]
    Link { log: String },
    #[error(transparent)]
    Gl(#[from] super::GlError),
}

/// Represents an individual compiled shader stage.
pub struct Shader<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    id: G::Shader,
    stage: Stage,
}

impl<G: GlBackend> Shader<G> {
    /// Compiles a new shader from the given source code.
    pub fn compile(gl: &Arc<G>, stage: Stage, source: &str) -> Result<Self, ShaderError> {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(super::GlError::create("shader"))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        log::debug!("compiled {stage} shader");
        Ok(Self {
            gl: Arc::clone(gl),
            id: shader,
            stage,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

impl<G: GlBackend> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// A value that can be uploaded to a uniform location.
pub trait Uniform {
    /// Uploads the value to the given location of the program in use.
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation);
}

impl Uniform for bool {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_i32(location, *self as i32);
    }
}

impl Uniform for i32 {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_i32(location, *self);
    }
}

impl Uniform for f32 {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_1_f32(location, *self);
    }
}

impl Uniform for Vec2 {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_2_f32(location, self.x, self.y);
    }
}

impl Uniform for Vec4 {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_4_f32(location, self.x, self.y, self.z, self.w);
    }
}

impl Uniform for Mat4 {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        gl.uniform_matrix_4_f32(location, self.as_ref());
    }
}

impl<T: Uniform> Uniform for &T {
    fn upload<G: GlBackend>(&self, gl: &G, location: &G::UniformLocation) {
        (*self).upload(gl, location);
    }
}

/// A uniform location resolved once, so uploads skip the lookup by name.
pub struct UniformSlot<G: GlBackend = glow::Context> {
    name: String,
    location: G::UniformLocation,
}

impl<G: GlBackend> UniformSlot<G> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Represents a linked OpenGL program made of one vertex and one fragment shader.
///
/// The program keeps both stages alive until it is dropped. The program object is deleted
/// first, then its shaders.
pub struct ShaderProgram<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    id: G::Program,
    _vertex: Shader<G>,
    _fragment: Shader<G>,
}

impl<G: GlBackend> ShaderProgram<G> {
    /// Links a new shader program from a compiled vertex and fragment shader.
    ///
    /// On failure both shaders are released together with the program object.
    pub fn link(gl: &Arc<G>, vertex: Shader<G>, fragment: Shader<G>) -> Result<Self, ShaderError> {
        debug_assert_eq!(vertex.stage(), Stage::Vertex);
        debug_assert_eq!(fragment.stage(), Stage::Fragment);

        let program = gl
            .create_program()
            .map_err(super::GlError::create("program"))?;

        gl.attach_shader(program, vertex.id);
        gl.attach_shader(program, fragment.id);
        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        gl.detach_shader(program, vertex.id);
        gl.detach_shader(program, fragment.id);

        log::debug!("linked shader program {program:?}");
        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
            _vertex: vertex,
            _fragment: fragment,
        })
    }

    /// Compiles both stages and links them. The first failing step aborts the build, so a
    /// stage that failed to compile never reaches the linker.
    pub fn build(gl: &Arc<G>, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vertex = Shader::compile(gl, Stage::Vertex, vertex_src)?;
        let fragment = Shader::compile(gl, Stage::Fragment, fragment_src)?;
        Self::link(gl, vertex, fragment)
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.id));
    }

    /// Sets a uniform variable, looking its location up by name. Unknown names are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.gl.uniform_location(self.id, name) {
            value.upload(&*self.gl, &location);
        }
    }

    /// Resolves the location of a uniform once.
    pub fn uniform_slot(&self, name: &str) -> Option<UniformSlot<G>> {
        self.gl
            .uniform_location(self.id, name)
            .map(|location| UniformSlot {
                name: name.to_string(),
                location,
            })
    }

    /// Sets a uniform variable through a previously resolved slot.
    pub fn set_slot<T: Uniform>(&self, slot: &UniformSlot<G>, value: T) {
        value.upload(&*self.gl, &slot.location);
    }

    /// Returns the location of a vertex attribute, if the program declares it.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        self.gl.attrib_location(self.id, name)
    }

    pub(crate) fn gl(&self) -> &Arc<G> {
        &self.gl
    }
}

impl<G: GlBackend> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
