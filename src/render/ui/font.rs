//! The built-in bitmap font.
//!
//! Glyphs are 5x7 pixels inside 6x8 cells, so spacing between characters and lines is part
//! of the cell. The atlas packs the cells 16 to a row. Lowercase letters render with their
//! uppercase glyph; characters without a glyph advance the cursor but draw nothing.

use glam::{UVec2, Vec2, Vec4};

use super::uirenderer::{DrawCommand, UIRenderMode};

const GLYPHS: &str = " !%()+-./:_0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One row of five pixels per byte, most significant of the low five bits leftmost.
#[rustfmt::skip]
const BITMAPS: [[u8; 7]; 47] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // !
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // %
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // (
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // )
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // +
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // .
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // /
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // _
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

const CELL: UVec2 = UVec2::new(6, 8);
const COLUMNS: u32 = 16;
const ROWS: u32 = BITMAPS.len().div_ceil(COLUMNS as usize) as u32;

/// The built-in font. Its atlas is generated in memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Font;

impl Font {
    /// Size of the atlas in pixels.
    pub fn atlas_size(&self) -> UVec2 {
        UVec2::new(CELL.x * COLUMNS, CELL.y * ROWS)
    }

    /// Rasterizes every glyph as white pixels with alpha coverage.
    pub fn atlas_rgba(&self) -> Vec<u8> {
        let size = self.atlas_size();
        let mut pixels = vec![0u8; (size.x * size.y * 4) as usize];

        for (index, rows) in BITMAPS.iter().enumerate() {
            let origin = Self::cell_origin(index as u32);
            for (y, bits) in rows.iter().enumerate() {
                for x in 0..5 {
                    if bits & (0x10 >> x) == 0 {
                        continue;
                    }
                    let px = origin.x + x;
                    let py = origin.y + y as u32;
                    let i = ((py * size.x + px) * 4) as usize;
                    pixels[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
                }
            }
        }

        pixels
    }

    fn cell_origin(index: u32) -> UVec2 {
        UVec2::new(index % COLUMNS, index / COLUMNS) * CELL
    }

    fn glyph_index(c: char) -> Option<u32> {
        let c = c.to_ascii_uppercase();
        GLYPHS.find(c).map(|i| i as u32)
    }

    /// The atlas rectangle of a character's cell, in texture coordinates.
    pub fn glyph_uvs(&self, c: char) -> Option<[Vec2; 2]> {
        let index = Self::glyph_index(c)?;
        let atlas = self.atlas_size().as_vec2();
        let min = Self::cell_origin(index).as_vec2() / atlas;
        let max = min + CELL.as_vec2() / atlas;
        Some([min, max])
    }

    /// Size of one character cell when text is drawn `font_size` pixels tall.
    pub fn char_size(&self, font_size: f32) -> Vec2 {
        Vec2::new(font_size * CELL.x as f32 / CELL.y as f32, font_size)
    }

    pub fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        let char_size = self.char_size(font_size);
        let lines: Vec<&str> = text.split('\n').collect();
        let max_width = lines
            .iter()
            .map(|line| line.chars().count() as f32 * char_size.x)
            .fold(0.0, f32::max);
        Vec2::new(max_width, lines.len() as f32 * char_size.y)
    }

    /// Lays out `text` from the origin as one draw command per visible glyph.
    pub fn text(&self, text: &str, font_size: f32, color: Vec4) -> Vec<DrawCommand> {
        let mut commands = Vec::new();
        let mut cursor = Vec2::ZERO;
        let char_size = self.char_size(font_size);

        for line in text.lines() {
            for c in line.chars() {
                if let Some(uvs) = self.glyph_uvs(c).filter(|_| c != ' ') {
                    commands.push(DrawCommand {
                        rect: [cursor, cursor + char_size],
                        uv_rect: uvs,
                        mode: UIRenderMode::Glyph(color),
                    });
                }
                cursor.x += char_size.x;
            }
            cursor.x = 0.0;
            cursor.y += char_size.y;
        }

        commands
    }
}
