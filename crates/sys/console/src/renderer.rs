//! Glyph rasterizer
//!
//! Draws one glyph's bitmap, scaled, into a screen cell. The cell is
//! filled with the background color first and the foreground blocks are
//! painted on top, so no stale pixels survive between glyphs sharing a
//! cell.

use fbterm_video::{Color, Framebuffer};

use crate::font::{FontStore, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Cell geometry and scaled glyph drawing
pub struct Renderer {
    scale: u32,
    cell_width: u32,
    cell_height: u32,
}

impl Renderer {
    /// Create a renderer at the given scale. The caller validates the
    /// scale; zero is rejected at the console boundary.
    pub const fn new(scale: u32) -> Self {
        Self {
            scale,
            cell_width: GLYPH_WIDTH as u32 * scale,
            cell_height: GLYPH_HEIGHT as u32 * scale,
        }
    }

    /// Change the scale and recompute cell pixel dimensions
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale;
        self.cell_width = GLYPH_WIDTH as u32 * scale;
        self.cell_height = GLYPH_HEIGHT as u32 * scale;
    }

    /// Current scale multiplier
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Cell width in pixels
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Cell height in pixels
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Draw a glyph into the cell at (col, row).
    ///
    /// Two passes: clear the whole cell to `bg`, then one scale x scale
    /// `fg` block per set bit. Rendering the same glyph twice at the
    /// same cell is idempotent.
    pub fn draw_glyph<F: Framebuffer>(
        &self,
        fb: &mut F,
        font: &FontStore,
        code: u8,
        col: u32,
        row: u32,
        fg: Color,
        bg: Color,
    ) {
        let base_x = col * self.cell_width;
        let base_y = row * self.cell_height;

        fb.fill_rect(base_x, base_y, self.cell_width, self.cell_height, bg);

        for (y, &bits) in font.glyph(code).iter().enumerate() {
            if bits == 0 {
                continue;
            }
            for x in 0..GLYPH_WIDTH {
                if (bits >> (7 - x)) & 1 == 0 {
                    continue;
                }
                fb.fill_rect(
                    base_x + x as u32 * self.scale,
                    base_y + y as u32 * self.scale,
                    self.scale,
                    self.scale,
                    fg,
                );
            }
        }
    }

    /// Paint a solid caret block over the cell at (col, row).
    ///
    /// The next glyph's clear pass overwrites it.
    pub fn draw_caret<F: Framebuffer>(&self, fb: &mut F, col: u32, row: u32, color: Color) {
        fb.fill_rect(
            col * self.cell_width,
            row * self.cell_height,
            self.cell_width,
            self.cell_height,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbterm_video::FramebufferInfo;

    const WIDTH: u32 = 32;
    const HEIGHT: u32 = 32;

    struct TestFramebuffer {
        pixels: [u32; (WIDTH * HEIGHT) as usize],
    }

    impl TestFramebuffer {
        fn new() -> Self {
            Self {
                pixels: [0; (WIDTH * HEIGHT) as usize],
            }
        }

        fn at(&self, x: u32, y: u32) -> u32 {
            self.pixels[(y * WIDTH + x) as usize]
        }
    }

    impl Framebuffer for TestFramebuffer {
        fn info(&self) -> FramebufferInfo {
            FramebufferInfo {
                width: WIDTH,
                height: HEIGHT,
                pitch: WIDTH * 4,
                bpp: 32,
            }
        }

        fn buffer(&mut self) -> *mut u32 {
            self.pixels.as_mut_ptr()
        }
    }

    fn test_font() -> FontStore {
        let mut font = FontStore::new();
        font.load_builtin();
        font
    }

    #[test]
    fn test_render_is_idempotent() {
        let font = test_font();
        let renderer = Renderer::new(1);
        let mut fb = TestFramebuffer::new();

        renderer.draw_glyph(&mut fb, &font, b'A', 0, 0, Color::WHITE, Color::BLACK);
        let first = fb.pixels;
        renderer.draw_glyph(&mut fb, &font, b'A', 0, 0, Color::WHITE, Color::BLACK);
        assert_eq!(first, fb.pixels);
    }

    #[test]
    fn test_clear_pass_removes_previous_glyph() {
        let font = test_font();
        let renderer = Renderer::new(1);
        let mut fb = TestFramebuffer::new();

        renderer.draw_glyph(&mut fb, &font, b'#', 0, 0, Color::WHITE, Color::BLACK);
        renderer.draw_glyph(&mut fb, &font, b' ', 0, 0, Color::WHITE, Color::BLACK);

        // A blank glyph leaves the whole cell at the background color
        for y in 0..16 {
            for x in 0..8 {
                assert_eq!(fb.at(x, y), Color::BLACK.to_u32());
            }
        }
    }

    #[test]
    fn test_scale_expands_pixels_to_blocks() {
        let mut glyphs = [0u8; crate::font::GLYPH_TABLE_SIZE];
        // glyph 1, row 0, leftmost pixel only
        glyphs[1 * 16] = 0x80;
        let mut font = FontStore::new();
        font.load_blob(&glyphs).unwrap();

        let renderer = Renderer::new(2);
        let mut fb = TestFramebuffer::new();
        renderer.draw_glyph(&mut fb, &font, 1, 0, 0, Color::WHITE, Color::BLACK);

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(fb.at(x, y), Color::WHITE.to_u32());
            }
        }
        assert_eq!(fb.at(2, 0), Color::BLACK.to_u32());
        assert_eq!(fb.at(0, 2), Color::BLACK.to_u32());
    }

    #[test]
    fn test_cell_origin_follows_cursor() {
        let font = test_font();
        let renderer = Renderer::new(1);
        let mut fb = TestFramebuffer::new();

        // '!' at cell (1, 1): all its pixels live inside that cell
        renderer.draw_glyph(&mut fb, &font, b'!', 1, 1, Color::WHITE, Color::BLACK);
        let mut found = false;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if fb.at(x, y) == Color::WHITE.to_u32() {
                    assert!((8..16).contains(&x));
                    assert!((16..32).contains(&y));
                    found = true;
                }
            }
        }
        assert!(found);
    }

    #[test]
    fn test_caret_fills_cell() {
        let renderer = Renderer::new(1);
        let mut fb = TestFramebuffer::new();
        renderer.draw_caret(&mut fb, 1, 0, Color::WHITE);
        for y in 0..16 {
            for x in 8..16 {
                assert_eq!(fb.at(x, y), Color::WHITE.to_u32());
            }
        }
        assert_eq!(fb.at(7, 0), 0);
    }
}
