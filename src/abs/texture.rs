//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.
//! Every texture repeats on both axes and samples with nearest filtering, without mipmaps.

use std::{path::Path, sync::Arc};

use super::{GlBackend, GlError};

/// Represents a texture stored on the GPU side.
pub struct Texture<G: GlBackend = glow::Context> {
    gl: Arc<G>,
    id: G::Texture,
    width: u32,
    height: u32,
}

impl<G: GlBackend> Texture<G> {
    /// Decodes the image at `path` and uploads it as an RGB texture.
    ///
    /// A missing or undecodable file is logged and leaves the texture without contents; it
    /// still exists and can be bound, it just samples as undefined (usually black).
    pub fn load(gl: &Arc<G>, path: impl AsRef<Path>) -> Result<Self, GlError> {
        let path = path.as_ref();
        let texture = gl.create_texture().map_err(GlError::create("texture"))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        let (width, height) = match image::open(path) {
            Ok(image) => {
                let pixels = image.into_rgb8();
                let (width, height) = pixels.dimensions();
                gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    glow::RGB as i32,
                    width as i32,
                    height as i32,
                    glow::RGB,
                    glow::UNSIGNED_BYTE,
                    Some(pixels.as_raw().as_slice()),
                );
                drop(pixels);
                log::info!("loaded texture {} ({width}x{height})", path.display());
                (width, height)
            }
            Err(err) => {
                log::error!("Failed to load image {}: {err}", path.display());
                (0, 0)
            }
        };

        Self::apply_sampling(gl.as_ref());
        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(Self {
            gl: Arc::clone(gl),
            id: texture,
            width,
            height,
        })
    }

    /// Creates a new texture from the given raw RGBA data.
    pub fn from_rgba(gl: &Arc<G>, width: u32, height: u32, data: &[u8]) -> Result<Self, GlError> {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        let texture = gl.create_texture().map_err(GlError::create("texture"))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            glow::RGBA as i32,
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(data),
        );
        Self::apply_sampling(gl.as_ref());
        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(Self {
            gl: Arc::clone(gl),
            id: texture,
            width,
            height,
        })
    }

    fn apply_sampling(gl: &G) {
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::NEAREST as i32,
        );
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether image data was uploaded.
    pub fn has_contents(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        self.gl.active_texture(glow::TEXTURE0 + unit);
        self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
    }
}

impl<G: GlBackend> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::testing::{Call, RecordingBackend};

    fn sampling_calls() -> Vec<Call> {
        vec![
            Call::TexParameter(glow::TEXTURE_WRAP_S, glow::REPEAT as i32),
            Call::TexParameter(glow::TEXTURE_WRAP_T, glow::REPEAT as i32),
            Call::TexParameter(glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32),
            Call::TexParameter(glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32),
        ]
    }

    #[test]
    fn loads_png_as_tightly_packed_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.png");
        image::RgbImage::from_pixel(3, 2, image::Rgb([200, 40, 10]))
            .save(&path)
            .unwrap();

        let gl = Arc::new(RecordingBackend::new());
        let texture = Texture::load(&gl, &path).unwrap();
        assert_eq!((texture.width(), texture.height()), (3, 2));
        assert!(texture.has_contents());

        let calls = gl.calls();
        assert!(calls.contains(&Call::PixelStore(glow::UNPACK_ALIGNMENT, 1)));
        assert!(calls.contains(&Call::TexImage {
            internal_format: glow::RGB as i32,
            width: 3,
            height: 2,
            format: glow::RGB,
            len: Some(18),
        }));
        for call in sampling_calls() {
            assert!(calls.contains(&call), "missing {call:?}");
        }
    }

    #[test]
    fn missing_file_keeps_an_empty_texture() {
        let gl = Arc::new(RecordingBackend::new());
        let texture = Texture::load(&gl, "does/not/exist.png").unwrap();
        assert!(!texture.has_contents());

        let calls = gl.calls();
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, Call::TexImage { .. }))
                .count(),
            0
        );
        for call in sampling_calls() {
            assert!(calls.contains(&call), "missing {call:?}");
        }
    }

    #[test]
    fn bind_selects_the_texture_unit() {
        let gl = Arc::new(RecordingBackend::new());
        let texture = Texture::from_rgba(&gl, 1, 1, &[255, 255, 255, 255]).unwrap();
        gl.clear_calls();

        texture.bind(2);
        assert_eq!(
            gl.calls(),
            vec![Call::ActiveTexture(glow::TEXTURE0 + 2), Call::BindTexture(Some(1))]
        );

        drop(texture);
        assert!(gl.calls().contains(&Call::DeleteTexture(1)));
    }
}
