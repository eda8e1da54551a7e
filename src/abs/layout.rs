//! Interleaved vertex layouts.
//!
//! A [`VertexLayout`] is built from an ordered list of [`AttributeDescriptor`]s and computes the
//! stride of one vertex record and the byte offset of every attribute inside it. Binding the
//! layout resolves each attribute by name against a linked [`ShaderProgram`].
//!
//! The layout cannot see the vertex data: the descriptors must be listed in the same order the
//! caller packed the buffer, otherwise the attributes silently read the wrong bytes.

use super::{GlBackend, ShaderProgram};

/// The scalar type of one attribute component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarType {
    Float,
    Int,
    UnsignedInt,
    Short,
    UnsignedShort,
    Byte,
    UnsignedByte,
}

impl ScalarType {
    /// Size of one component in bytes.
    pub const fn size(self) -> usize {
        match self {
            ScalarType::Float => size_of::<f32>(),
            ScalarType::Int => size_of::<i32>(),
            ScalarType::UnsignedInt => size_of::<u32>(),
            ScalarType::Short => size_of::<i16>(),
            ScalarType::UnsignedShort => size_of::<u16>(),
            ScalarType::Byte => size_of::<i8>(),
            ScalarType::UnsignedByte => size_of::<u8>(),
        }
    }

    pub const fn gl_type(self) -> u32 {
        match self {
            ScalarType::Float => glow::FLOAT,
            ScalarType::Int => glow::INT,
            ScalarType::UnsignedInt => glow::UNSIGNED_INT,
            ScalarType::Short => glow::SHORT,
            ScalarType::UnsignedShort => glow::UNSIGNED_SHORT,
            ScalarType::Byte => glow::BYTE,
            ScalarType::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }

    /// Whether the type goes through the integer attribute path.
    pub const fn is_integer(self) -> bool {
        !matches!(self, ScalarType::Float)
    }
}

/// One named attribute of an interleaved vertex record.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub scalar_type: ScalarType,
    pub components: usize,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, scalar_type: ScalarType, components: usize) -> Self {
        debug_assert!((1..=4).contains(&components));
        Self {
            name: name.into(),
            scalar_type,
            components,
        }
    }

    /// Shorthand for an attribute of `components` floats.
    pub fn float(name: impl Into<String>, components: usize) -> Self {
        Self::new(name, ScalarType::Float, components)
    }

    /// Width of the attribute in bytes.
    pub fn byte_size(&self) -> usize {
        self.components * self.scalar_type.size()
    }
}

/// An attribute together with its position inside the record.
#[derive(Clone, Debug, PartialEq)]
struct AttributeSlot {
    descriptor: AttributeDescriptor,
    offset: usize,
}

/// The computed layout of an interleaved vertex record.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexLayout {
    slots: Vec<AttributeSlot>,
    stride: usize,
}

impl VertexLayout {
    /// Lays the attributes out back to back, in the given order.
    pub fn new(attributes: impl IntoIterator<Item = AttributeDescriptor>) -> Self {
        let mut offset = 0;
        let slots: Vec<_> = attributes
            .into_iter()
            .map(|descriptor| {
                let slot = AttributeSlot {
                    offset,
                    descriptor,
                };
                offset += slot.descriptor.byte_size();
                slot
            })
            .collect();

        Self {
            slots,
            stride: offset,
        }
    }

    /// Byte distance between two consecutive records.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of scalar components in one record.
    pub fn components(&self) -> usize {
        self.slots.iter().map(|s| s.descriptor.components).sum()
    }

    /// Byte offset of the named attribute.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .find(|s| s.descriptor.name == name)
            .map(|s| s.offset)
    }

    /// Points every attribute of the currently bound vertex array at its place in the
    /// currently bound array buffer.
    ///
    /// Attributes the program does not declare are skipped with a warning; their names are
    /// returned so the caller can tell which slots will read nothing.
    pub fn bind<G: GlBackend>(&self, program: &ShaderProgram<G>) -> Vec<String> {
        let gl = program.gl();
        let stride = self.stride as i32;
        let mut missing = Vec::new();

        for slot in &self.slots {
            let attribute = &slot.descriptor;
            let Some(location) = program.attrib_location(&attribute.name) else {
                log::warn!("attribute `{}` not found in shader program", attribute.name);
                missing.push(attribute.name.clone());
                continue;
            };

            gl.enable_vertex_attrib_array(location);
            let size = attribute.components as i32;
            let data_type = attribute.scalar_type.gl_type();
            let offset = slot.offset as i32;
            if attribute.scalar_type.is_integer() {
                gl.vertex_attrib_pointer_i32(location, size, data_type, stride, offset);
            } else {
                gl.vertex_attrib_pointer_f32(location, size, data_type, false, stride, offset);
            }
        }

        missing
    }
}

/// Binds an ordered list of attributes to `program`, returning the names it does not declare.
pub fn bind_attributes<G: GlBackend>(
    program: &ShaderProgram<G>,
    attributes: &[AttributeDescriptor],
) -> Vec<String> {
    VertexLayout::new(attributes.iter().cloned()).bind(program)
}
