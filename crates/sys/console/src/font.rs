//! Font storage and loading
//!
//! Owns the 256-glyph bitmap table. Glyphs are 8x16, one byte per row,
//! bit 7 = leftmost pixel. The table is replaced wholesale by the load
//! operations and never partially mutated.

use crate::error::{ConsoleError, ConsoleResult};
use crate::font_data::{BUILTIN_FIRST, BUILTIN_GLYPHS};

/// Glyph width in pixels
pub const GLYPH_WIDTH: usize = 8;
/// Glyph height in pixels
pub const GLYPH_HEIGHT: usize = 16;
/// Number of glyphs in a font
pub const GLYPH_COUNT: usize = 256;
/// Size of a complete glyph table in bytes
pub const GLYPH_TABLE_SIZE: usize = GLYPH_COUNT * GLYPH_HEIGHT;

/// Legacy glyph width in pixels
pub const CLASSIC_WIDTH: usize = 4;
/// Legacy glyph height in pixels
pub const CLASSIC_HEIGHT: usize = 8;
/// Upscale factor applied when converting a legacy font
pub const CLASSIC_SCALE: usize = 2;

/// A legacy small-glyph font: 256 glyphs of 4x8 single-bit pixels,
/// one byte per row, bit 7 = leftmost pixel (upper four bits used).
///
/// Converting consumes the table; the legacy data is released afterward.
pub struct ClassicFont {
    pub glyphs: [[u8; CLASSIC_HEIGHT]; GLYPH_COUNT],
}

impl ClassicFont {
    pub const fn new(glyphs: [[u8; CLASSIC_HEIGHT]; GLYPH_COUNT]) -> Self {
        Self { glyphs }
    }
}

/// Owns the active glyph table
pub struct FontStore {
    glyphs: [u8; GLYPH_TABLE_SIZE],
}

impl FontStore {
    /// Create a font store with a blank (all-zero) glyph table
    pub const fn new() -> Self {
        Self {
            glyphs: [0; GLYPH_TABLE_SIZE],
        }
    }

    /// Replace the table with a glyph blob.
    ///
    /// The blob must be exactly 256 x 16 bytes.
    pub fn load_blob(&mut self, data: &[u8]) -> ConsoleResult<()> {
        if data.len() != GLYPH_TABLE_SIZE {
            return Err(ConsoleError::FontBlobSize);
        }
        self.glyphs.copy_from_slice(data);
        Ok(())
    }

    /// Load the embedded default font.
    ///
    /// Printable ASCII gets the builtin VGA shapes; everything else is blank.
    pub fn load_builtin(&mut self) {
        self.glyphs = [0; GLYPH_TABLE_SIZE];
        let start = BUILTIN_FIRST * GLYPH_HEIGHT;
        self.glyphs[start..start + BUILTIN_GLYPHS.len()].copy_from_slice(&BUILTIN_GLYPHS);
    }

    /// Convert a legacy 4x8 font into the 8x16 table, consuming it.
    ///
    /// Each set source pixel becomes a 2x2 block, centered by
    /// `pad = (dst - src * scale) / 2` per axis. Glyph 255 is reserved
    /// and stays blank.
    pub fn load_classic(&mut self, classic: ClassicFont) {
        self.glyphs = [0; GLYPH_TABLE_SIZE];

        let xpad = (GLYPH_WIDTH - CLASSIC_WIDTH * CLASSIC_SCALE) / 2;
        let ypad = (GLYPH_HEIGHT - CLASSIC_HEIGHT * CLASSIC_SCALE) / 2;

        for code in 0..GLYPH_COUNT - 1 {
            for sy in 0..CLASSIC_HEIGHT {
                let bits = classic.glyphs[code][sy];
                if bits == 0 {
                    continue;
                }
                for sx in 0..CLASSIC_WIDTH {
                    if (bits >> (7 - sx)) & 1 == 0 {
                        continue;
                    }
                    for dy in 0..CLASSIC_SCALE {
                        for dx in 0..CLASSIC_SCALE {
                            let x = sx * CLASSIC_SCALE + xpad + dx;
                            let y = sy * CLASSIC_SCALE + ypad + dy;
                            self.glyphs[code * GLYPH_HEIGHT + y] |= 0x80 >> x;
                        }
                    }
                }
            }
        }
        // `classic` is dropped here: ownership was transferred in
    }

    /// Get the 16 row bytes for a glyph
    pub fn glyph(&self, code: u8) -> &[u8] {
        let start = code as usize * GLYPH_HEIGHT;
        &self.glyphs[start..start + GLYPH_HEIGHT]
    }

    /// Check whether a glyph pixel is set
    pub fn pixel_set(&self, code: u8, x: usize, y: usize) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        (self.glyph(code)[y] >> (7 - x)) & 1 != 0
    }

    /// The raw glyph table
    pub fn as_bytes(&self) -> &[u8] {
        &self.glyphs
    }
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}
