//! Console - cursor state machine over the glyph rasterizer
//!
//! Consumes a byte stream one character at a time, renders glyphs,
//! handles control characters, and scrolls the framebuffer when the
//! cursor runs off the bottom of the screen.

use core::fmt;

use fbterm_video::{Color, Framebuffer};

use crate::error::{ConsoleError, ConsoleResult};
use crate::font::{ClassicFont, FontStore, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::renderer::Renderer;

/// Tab width in columns. Must be a power of two: the tab advance is
/// computed with a bitmask, not a modulo.
pub const TAB_SIZE: u32 = 4;

/// Text console over a framebuffer
pub struct Console<F: Framebuffer> {
    fb: F,
    font: FontStore,
    renderer: Renderer,
    cols: u32,
    rows: u32,
    cursor_x: u32,
    cursor_y: u32,
    fg: Color,
    bg: Color,
}

impl<F: Framebuffer> Console<F> {
    /// Create a console over a framebuffer at the given font scale.
    ///
    /// Validates the framebuffer geometry and the scale, and loads the
    /// builtin font.
    pub fn new(fb: F, scale: u32) -> ConsoleResult<Self> {
        fb.info().validate()?;

        let mut console = Self {
            fb,
            font: FontStore::new(),
            renderer: Renderer::new(1),
            cols: 0,
            rows: 0,
            cursor_x: 0,
            cursor_y: 0,
            fg: Color::WHITE,
            bg: Color::BLACK,
        };
        console.font.load_builtin();
        console.set_scale(scale)?;
        Ok(console)
    }

    /// Change the font scale and recompute the screen geometry.
    ///
    /// An existing cursor is deliberately NOT clamped: when the new
    /// geometry is smaller it stays transiently out of bounds until the
    /// next processed byte normalizes it.
    pub fn set_scale(&mut self, scale: u32) -> ConsoleResult<()> {
        if scale == 0 {
            return Err(ConsoleError::ZeroScale);
        }

        let info = self.fb.info();
        let cols = info.cols(GLYPH_WIDTH as u32 * scale);
        let rows = info.rows(GLYPH_HEIGHT as u32 * scale);
        if cols == 0 || rows == 0 {
            return Err(ConsoleError::DegenerateGeometry);
        }

        self.renderer.set_scale(scale);
        self.cols = cols;
        self.rows = rows;
        Ok(())
    }

    /// Current font scale
    pub fn scale(&self) -> u32 {
        self.renderer.scale()
    }

    /// Screen size in cells (columns, rows)
    pub fn size(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Cursor position in cells (column, row)
    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the cursor. The position is taken as-is; the next processed
    /// byte normalizes out-of-range values.
    pub fn set_cursor(&mut self, col: u32, row: u32) {
        self.cursor_x = col;
        self.cursor_y = row;
    }

    /// Set foreground and background colors
    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = bg;
    }

    /// Replace the font from a raw glyph blob
    pub fn load_font_blob(&mut self, data: &[u8]) -> ConsoleResult<()> {
        self.font.load_blob(data)
    }

    /// Load the embedded default font
    pub fn load_font_builtin(&mut self) {
        self.font.load_builtin();
    }

    /// Convert and load a legacy small-glyph font, consuming it
    pub fn load_font_classic(&mut self, classic: ClassicFont) {
        self.font.load_classic(classic);
    }

    /// The font store, for inspection
    pub fn font(&self) -> &FontStore {
        &self.font
    }

    /// Clear the screen and reset the cursor to the origin
    pub fn clear(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.fb.clear(self.bg);
    }

    /// Process one byte of the character stream
    pub fn print_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.render(b' ');
                self.cursor_y += 1;
                self.cursor_x = 0;
            }

            b'\t' => {
                self.render(b' ');
                self.cursor_x = (self.cursor_x + TAB_SIZE) & !(TAB_SIZE - 1);
            }

            0x08 => {
                // backspace stops at the left edge
                if self.cursor_x > 0 {
                    self.render(b' ');
                    self.cursor_x -= 1;
                }
            }

            b'\r' => {
                self.render(b' ');
                self.cursor_x = 0;
            }

            0x0B => {
                // vertical tab intentionally unimplemented
            }

            0x07 => {
                // todo: bell
            }

            0x0C => {
                self.clear();
            }

            _ => {
                self.render(byte);
                self.cursor_x += 1;
            }
        }

        self.sync_cursor();
    }

    /// Process a text sequence byte by byte
    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.print_byte(byte);
        }
    }

    fn render(&mut self, code: u8) {
        self.renderer.draw_glyph(
            &mut self.fb,
            &self.font,
            code,
            self.cursor_x,
            self.cursor_y,
            self.fg,
            self.bg,
        );
    }

    /// Normalize the cursor and repaint the caret.
    ///
    /// Column wrapping handles a single oversized jump (a wide tab) in
    /// one pass; each excess row scrolls the framebuffer up by one
    /// cell-row and clears the exposed band.
    fn sync_cursor(&mut self) {
        while self.cursor_x >= self.cols {
            self.cursor_x -= self.cols;
            self.cursor_y += 1;
        }

        while self.cursor_y >= self.rows {
            self.cursor_y -= 1;
            self.fb.scroll_up(self.renderer.cell_height(), self.bg);
        }

        self.renderer
            .draw_caret(&mut self.fb, self.cursor_x, self.cursor_y, self.fg);
    }
}

impl<F: Framebuffer> fmt::Write for Console<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Console::write_str(self, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbterm_video::FramebufferInfo;

    // 8 columns x 4 rows at scale 1
    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 64;

    struct TestFramebuffer {
        pixels: [u32; (WIDTH * HEIGHT) as usize],
    }

    impl TestFramebuffer {
        fn new() -> Self {
            Self {
                pixels: [0; (WIDTH * HEIGHT) as usize],
            }
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

    fn console() -> Console<TestFramebuffer> {
        Console::new(TestFramebuffer::new(), 1).unwrap()
    }

    fn pixel(console: &mut Console<TestFramebuffer>, x: u32, y: u32) -> u32 {
        let idx = (y * WIDTH + x) as usize;
        console.fb.pixels[idx]
    }

    #[test]
    fn test_geometry_from_scale() {
        let con = console();
        assert_eq!(con.size(), (8, 4));

        let con = Console::new(TestFramebuffer::new(), 2).unwrap();
        assert_eq!(con.size(), (4, 2));
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert_eq!(
            Console::new(TestFramebuffer::new(), 0).err(),
            Some(ConsoleError::ZeroScale)
        );
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        // cell would be 80x160 pixels on a 64x64 screen
        assert_eq!(
            Console::new(TestFramebuffer::new(), 10).err(),
            Some(ConsoleError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_printable_sequence_cursor_math() {
        let mut con = console();
        con.write_str("abcdefghij"); // 10 chars on an 8-wide screen
        assert_eq!(con.cursor(), (10 % 8, 10 / 8));
    }

    #[test]
    fn test_wrap_from_nonzero_column() {
        let mut con = console();
        con.set_cursor(5, 1);
        con.write_str("xxxx");
        // (5 + 4) mod 8 = 1, row 1 + 1 = 2
        assert_eq!(con.cursor(), (1, 2));
    }

    #[test]
    fn test_newline_moves_to_line_start() {
        let mut con = console();
        con.write_str("ab\n");
        assert_eq!(con.cursor(), (0, 1));
    }

    #[test]
    fn test_carriage_return_keeps_row() {
        let mut con = console();
        con.write_str("abc\r");
        assert_eq!(con.cursor(), (0, 0));
    }

    #[test]
    fn test_tab_rounds_up_to_next_stop() {
        let mut con = console();
        con.set_cursor(5, 0);
        con.print_byte(b'\t');
        assert_eq!(con.cursor(), (8 % 8, 1)); // stop 8 wraps on an 8-wide screen
    }

    #[test]
    fn test_tab_from_stop_advances_full_width() {
        let mut con = console();
        con.set_cursor(4, 0);
        con.print_byte(b'\t');
        assert_eq!(con.cursor(), (8 % 8, 1));

        let mut con = console();
        con.set_cursor(1, 0);
        con.print_byte(b'\t');
        assert_eq!(con.cursor(), (4, 0));
    }

    #[test]
    fn test_backspace_at_left_edge_is_noop() {
        let mut con = console();
        con.print_byte(0x08);
        assert_eq!(con.cursor(), (0, 0));

        con.write_str("ab");
        con.print_byte(0x08);
        assert_eq!(con.cursor(), (1, 0));
    }

    #[test]
    fn test_vertical_tab_and_bell_are_noops() {
        let mut con = console();
        con.write_str("ab");
        let before = con.cursor();
        con.print_byte(0x0B);
        con.print_byte(0x07);
        assert_eq!(con.cursor(), before);
    }

    #[test]
    fn test_form_feed_clears_and_homes() {
        let mut con = console();
        con.write_str("hello\nworld");
        con.print_byte(0x0C);
        assert_eq!(con.cursor(), (0, 0));
        // everything except the repainted caret cell is background
        for y in 16..HEIGHT {
            for x in 0..WIDTH {
                assert_eq!(pixel(&mut con, x, y), Color::BLACK.to_u32());
            }
        }
    }

    #[test]
    fn test_scroll_on_bottom_overflow() {
        let mut con = console();
        // 4 rows; the fourth newline pushes the cursor past the bottom
        con.write_str("a\nb\nc\nd\n");
        assert_eq!(con.cursor(), (0, 3));

        // the exposed bottom band (minus the caret cell) is background
        for y in 48..HEIGHT {
            for x in 8..WIDTH {
                assert_eq!(pixel(&mut con, x, y), Color::BLACK.to_u32());
            }
        }
    }

    #[test]
    fn test_scroll_moves_content_up() {
        let mut con = console();
        // Fill all four rows, then one more newline to scroll once.
        // 'b' starts on row 1 and must end up on row 0.
        con.write_str("a\nb\nc\nd");
        let mut b_row1 = [0u32; 8 * 16];
        for y in 0..16u32 {
            for x in 0..8u32 {
                b_row1[(y * 8 + x) as usize] = pixel(&mut con, x, 16 + y);
            }
        }
        con.print_byte(b'\n');
        for y in 0..16u32 {
            for x in 0..8u32 {
                assert_eq!(pixel(&mut con, x, y), b_row1[(y * 8 + x) as usize]);
            }
        }
    }

    #[test]
    fn test_caret_painted_at_cursor() {
        let mut con = console();
        con.print_byte(b'a');
        // cursor is now at (1, 0); its cell is a solid foreground block
        for y in 0..16 {
            for x in 8..16 {
                assert_eq!(pixel(&mut con, x, y), Color::WHITE.to_u32());
            }
        }
    }

    #[test]
    fn test_caret_overwritten_by_next_glyph() {
        let mut con = console();
        con.print_byte(b'a');
        con.print_byte(b' ');
        // the space's clear pass wiped the caret at (1, 0)
        for y in 0..16 {
            for x in 8..16 {
                assert_eq!(pixel(&mut con, x, y), Color::BLACK.to_u32());
            }
        }
    }

    #[test]
    fn test_shrinking_scale_leaves_cursor_out_of_bounds() {
        let mut con = console();
        con.set_cursor(7, 3);
        con.set_scale(2).unwrap();
        assert_eq!(con.size(), (4, 2));

        // not clamped yet
        let (col, row) = con.cursor();
        assert!(col >= 4 && row >= 2);

        // the next byte normalizes it back into range
        con.print_byte(b'x');
        let (col, row) = con.cursor();
        assert!(col < 4 && row < 2);
    }

    #[test]
    fn test_fmt_write_integration() {
        use core::fmt::Write;
        let mut con = console();
        write!(con, "{}+{}", 1, 2).unwrap();
        assert_eq!(con.cursor(), (3, 0));
    }
}
