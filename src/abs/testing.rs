//! A [`GlBackend`] that records every call instead of talking to a driver.
//!
//! Shader "compilation" succeeds when the source has balanced braces, attribute and uniform
//! names resolve against fixed lists, and all handles are sequential integers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::GlBackend;

#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    I32(i32),
    F32(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Mat4([f32; 16]),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateShader(u32, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    Uniform(&'static str, UniformValue),
    EnableAttrib(u32),
    AttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        integer: bool,
        stride: i32,
        offset: i32,
    },
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BufferData {
        target: u32,
        len: usize,
        usage: u32,
    },
    DeleteBuffer(u32),
    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    PixelStore(u32, i32),
    TexImage {
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        len: Option<usize>,
    },
    TexParameter(u32, i32),
    DeleteTexture(u32),
    ClearColor([f32; 4]),
    Clear(u32),
    Viewport(i32, i32, i32, i32),
    Enable(u32),
    Disable(u32),
    BlendFunc(u32, u32),
    DrawElements {
        mode: u32,
        count: i32,
    },
}

pub struct RecordingBackend {
    next_id: Cell<u32>,
    attributes: Vec<&'static str>,
    uniforms: Vec<&'static str>,
    fail_link: bool,
    sources: RefCell<HashMap<u32, String>>,
    calls: RefCell<Vec<Call>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            attributes: vec!["pos", "texcoord", "a_position", "a_uv"],
            uniforms: vec![
                "transform",
                "tex",
                "u_projection",
                "u_tex",
                "u_color",
                "u_solid",
            ],
            fail_link: false,
            sources: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the attribute names the fake programs declare.
    pub fn with_attributes(mut self, names: &[&'static str]) -> Self {
        self.attributes = names.to_vec();
        self
    }

    /// Replaces the uniform names the fake programs declare.
    pub fn with_uniforms(mut self, names: &[&'static str]) -> Self {
        self.uniforms = names.to_vec();
        self
    }

    /// Makes every link attempt fail.
    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every value uploaded to the named uniform, oldest first.
    pub fn uniform_uploads(&self, name: &str) -> Vec<UniformValue> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Uniform(n, value) if *n == name => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn uniform(&self, location: &u32, value: UniformValue) {
        let name = self.uniforms[*location as usize];
        self.record(Call::Uniform(name, value));
    }

    fn balanced(source: &str) -> bool {
        let mut depth = 0i32;
        for c in source.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0 && !source.trim().is_empty()
    }
}

impl GlBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateShader(id, shader_type));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .is_some_and(|source| Self::balanced(source))
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            return String::new();
        }
        let lines = self
            .sources
            .borrow()
            .get(&shader)
            .map_or(0, |source| source.lines().count());
        format!("0:{lines}(1): error: syntax error, unexpected end of file")
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        if self.fail_link {
            "error: vertex shader output `texcoord_out` not read by fragment shader".to_string()
        } else {
            String::new()
        }
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.uniforms
            .iter()
            .position(|n| *n == name)
            .map(|i| i as u32)
    }

    fn uniform_1_i32(&self, location: &u32, x: i32) {
        self.uniform(location, UniformValue::I32(x));
    }

    fn uniform_1_f32(&self, location: &u32, x: f32) {
        self.uniform(location, UniformValue::F32(x));
    }

    fn uniform_2_f32(&self, location: &u32, x: f32, y: f32) {
        self.uniform(location, UniformValue::Vec2([x, y]));
    }

    fn uniform_4_f32(&self, location: &u32, x: f32, y: f32, z: f32, w: f32) {
        self.uniform(location, UniformValue::Vec4([x, y, z, w]));
    }

    fn uniform_matrix_4_f32(&self, location: &u32, matrix: &[f32; 16]) {
        self.uniform(location, UniformValue::Mat4(*matrix));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .position(|n| *n == name)
            .map(|i| i as u32)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        _normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::AttribPointer {
            index,
            size,
            data_type,
            integer: false,
            stride,
            offset,
        });
    }

    fn vertex_attrib_pointer_i32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::AttribPointer {
            index,
            size,
            data_type,
            integer: true,
            stride,
            offset,
        });
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_texture(&self) -> Result<u32, String> {
        let id = self.next();
        self.record(Call::CreateTexture(id));
        Ok(id)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, _target: u32, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.record(Call::PixelStore(parameter, value));
    }

    fn tex_image_2d(
        &self,
        _target: u32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        _data_type: u32,
        pixels: Option<&[u8]>,
    ) {
        self.record(Call::TexImage {
            internal_format,
            width,
            height,
            format,
            len: pixels.map(<[u8]>::len),
        });
    }

    fn tex_parameter_i32(&self, _target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(parameter, value));
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor([red, green, blue, alpha]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn enable(&self, capability: u32) {
        self.record(Call::Enable(capability));
    }

    fn disable(&self, capability: u32) {
        self.record(Call::Disable(capability));
    }

    fn blend_func(&self, src: u32, dst: u32) {
        self.record(Call::BlendFunc(src, dst));
    }

    fn draw_elements(&self, mode: u32, count: i32, _element_type: u32, _offset: i32) {
        self.record(Call::DrawElements { mode, count });
    }
}
