//! Framebuffer abstraction
//!
//! Provides a trait for framebuffer backends with bounds-checked
//! drawing primitives. The console never touches pixel memory except
//! through these operations.

use crate::color::Color;

/// Framebuffer geometry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoError {
    /// Width or height is zero
    ZeroDimension,
    /// Only 32 bits per pixel is supported
    UnsupportedBpp,
    /// Pitch is smaller than one row of pixels
    PitchTooSmall,
    /// Pitch is not a whole number of 32-bit pixels
    PitchMisaligned,
}

/// Information about the current framebuffer mode
#[derive(Debug, Clone, Copy)]
pub struct FramebufferInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Bytes per row (may be larger than width * 4 due to padding)
    pub pitch: u32,
    /// Bits per pixel (must be 32)
    pub bpp: u32,
}

impl FramebufferInfo {
    /// Check the declared geometry for degenerate values.
    ///
    /// Callers construct this from bootloader-provided data; this is the
    /// one place where that data is validated.
    pub fn validate(&self) -> Result<(), VideoError> {
        if self.width == 0 || self.height == 0 {
            return Err(VideoError::ZeroDimension);
        }
        if self.bpp != 32 {
            return Err(VideoError::UnsupportedBpp);
        }
        if self.pitch < self.width * 4 {
            return Err(VideoError::PitchTooSmall);
        }
        if self.pitch % 4 != 0 {
            return Err(VideoError::PitchMisaligned);
        }
        Ok(())
    }

    /// Calculate number of character columns for given cell width
    pub fn cols(&self, cell_width: u32) -> u32 {
        self.width / cell_width
    }

    /// Calculate number of character rows for given cell height
    pub fn rows(&self, cell_height: u32) -> u32 {
        self.height / cell_height
    }

    /// Pitch in 32-bit pixels rather than bytes
    pub fn pixel_pitch(&self) -> u32 {
        self.pitch / 4
    }
}

/// Framebuffer backend trait
///
/// Implementations provide the geometry and a pointer to pixel memory;
/// the drawing primitives are bounds-checked against the declared
/// geometry and clip at the right and bottom edges.
pub trait Framebuffer {
    /// Get framebuffer information
    fn info(&self) -> FramebufferInfo;

    /// Get a mutable pointer to pixel memory
    fn buffer(&mut self) -> *mut u32;

    /// Set a pixel. Out-of-bounds coordinates are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let info = self.info();
        if x >= info.width || y >= info.height {
            return;
        }

        unsafe {
            let offset = (y * info.pixel_pitch() + x) as usize;
            *self.buffer().add(offset) = color.to_u32();
        }
    }

    /// Fill a rectangle with a color, clipped to the visible area
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Color) {
        let info = self.info();
        if x >= info.width || y >= info.height {
            return;
        }

        let x_end = x.saturating_add(w).min(info.width);
        let y_end = y.saturating_add(h).min(info.height);
        let pitch = info.pixel_pitch();
        let pixel = color.to_u32();

        unsafe {
            let buffer = self.buffer();
            for py in y..y_end {
                for px in x..x_end {
                    let offset = (py * pitch + px) as usize;
                    *buffer.add(offset) = pixel;
                }
            }
        }
    }

    /// Clear the entire framebuffer with a color
    fn clear(&mut self, color: Color) {
        let info = self.info();
        self.fill_rect(0, 0, info.width, info.height, color);
    }

    /// Shift the visible content up by `pixel_rows` and fill the exposed
    /// bottom band with `fill`.
    ///
    /// The move covers whole pitch rows. Source and destination overlap
    /// whenever `pixel_rows` is less than the height; `core::ptr::copy`
    /// has memmove semantics and handles either overlap direction.
    fn scroll_up(&mut self, pixel_rows: u32, fill: Color) {
        let info = self.info();
        if pixel_rows >= info.height {
            self.clear(fill);
            return;
        }

        let pitch = info.pixel_pitch() as usize;
        let moved = (info.height - pixel_rows) as usize * pitch;

        unsafe {
            let buffer = self.buffer();
            core::ptr::copy(buffer.add(pixel_rows as usize * pitch), buffer, moved);
        }

        self.fill_rect(0, info.height - pixel_rows, info.width, pixel_rows, fill);
    }
}

/// Simple single-buffered framebuffer over raw pixel memory
pub struct SimpleFramebuffer {
    buffer: *mut u32,
    info: FramebufferInfo,
}

impl SimpleFramebuffer {
    /// Create a new simple framebuffer from raw pointer and info
    ///
    /// # Safety
    /// The buffer pointer must be valid for the declared geometry for
    /// the lifetime of this struct.
    pub unsafe fn new(buffer: *mut u32, info: FramebufferInfo) -> Self {
        Self { buffer, info }
    }

    /// Create from bootloader-provided information
    ///
    /// # Safety
    /// The address must point to mapped pixel memory matching the
    /// declared geometry.
    pub unsafe fn from_boot_info(addr: u64, width: u32, height: u32, pitch: u32, bpp: u32) -> Self {
        let info = FramebufferInfo {
            width,
            height,
            pitch,
            bpp,
        };
        Self {
            buffer: addr as *mut u32,
            info,
        }
    }
}

impl Framebuffer for SimpleFramebuffer {
    fn info(&self) -> FramebufferInfo {
        self.info
    }

    fn buffer(&mut self) -> *mut u32 {
        self.buffer
    }
}

// Safety: SimpleFramebuffer is Send if its contents are accessed properly
unsafe impl Send for SimpleFramebuffer {}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 16;
    const HEIGHT: u32 = 8;
    // Two padding pixels per row to exercise pitch handling
    const PITCH_PIXELS: usize = WIDTH as usize + 2;

    struct TestFramebuffer {
        pixels: [u32; PITCH_PIXELS * HEIGHT as usize],
    }

    impl TestFramebuffer {
        fn new() -> Self {
            Self {
                pixels: [0; PITCH_PIXELS * HEIGHT as usize],
            }
        }

        fn at(&self, x: u32, y: u32) -> u32 {
            self.pixels[y as usize * PITCH_PIXELS + x as usize]
        }
    }

    impl Framebuffer for TestFramebuffer {
        fn info(&self) -> FramebufferInfo {
            FramebufferInfo {
                width: WIDTH,
                height: HEIGHT,
                pitch: PITCH_PIXELS as u32 * 4,
                bpp: 32,
            }
        }

        fn buffer(&mut self) -> *mut u32 {
            self.pixels.as_mut_ptr()
        }
    }

    #[test]
    fn test_validate_geometry() {
        let good = FramebufferInfo {
            width: 640,
            height: 480,
            pitch: 2560,
            bpp: 32,
        };
        assert_eq!(good.validate(), Ok(()));

        let zero = FramebufferInfo { width: 0, ..good };
        assert_eq!(zero.validate(), Err(VideoError::ZeroDimension));

        let bpp = FramebufferInfo { bpp: 24, ..good };
        assert_eq!(bpp.validate(), Err(VideoError::UnsupportedBpp));

        let pitch = FramebufferInfo { pitch: 2000, ..good };
        assert_eq!(pitch.validate(), Err(VideoError::PitchTooSmall));

        let misaligned = FramebufferInfo { pitch: 2562, ..good };
        assert_eq!(misaligned.validate(), Err(VideoError::PitchMisaligned));
    }

    #[test]
    fn test_set_pixel_respects_pitch() {
        let mut fb = TestFramebuffer::new();
        fb.set_pixel(3, 2, Color::WHITE);
        assert_eq!(fb.at(3, 2), Color::WHITE.to_u32());
        assert_eq!(fb.at(2, 3), 0);
    }

    #[test]
    fn test_set_pixel_out_of_bounds_ignored() {
        let mut fb = TestFramebuffer::new();
        fb.set_pixel(WIDTH, 0, Color::WHITE);
        fb.set_pixel(0, HEIGHT, Color::WHITE);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_fill_rect_clips_at_edges() {
        let mut fb = TestFramebuffer::new();
        fb.fill_rect(WIDTH - 2, HEIGHT - 2, 10, 10, Color::WHITE);
        assert_eq!(fb.at(WIDTH - 1, HEIGHT - 1), Color::WHITE.to_u32());
        assert_eq!(fb.at(WIDTH - 3, HEIGHT - 1), 0);
        // Pitch padding must stay untouched
        for y in 0..HEIGHT as usize {
            assert_eq!(fb.pixels[y * PITCH_PIXELS + WIDTH as usize], 0);
        }
    }

    #[test]
    fn test_scroll_up_moves_rows_and_clears_band() {
        let mut fb = TestFramebuffer::new();
        let marker = Color::from_u32(0xFFAA5500);
        let bg = Color::BLACK;

        // Mark pixel row 2, then scroll by two pixel rows
        fb.fill_rect(0, 2, WIDTH, 1, marker);
        fb.scroll_up(2, bg);

        assert_eq!(fb.at(0, 0), marker.to_u32());
        assert_eq!(fb.at(WIDTH - 1, 0), marker.to_u32());
        // Exposed band is the background color
        for y in HEIGHT - 2..HEIGHT {
            for x in 0..WIDTH {
                assert_eq!(fb.at(x, y), bg.to_u32());
            }
        }
    }

    #[test]
    fn test_scroll_past_height_clears_everything() {
        let mut fb = TestFramebuffer::new();
        let marker = Color::from_u32(0xFF123456);
        fb.fill_rect(0, 0, WIDTH, HEIGHT, marker);
        fb.scroll_up(HEIGHT + 1, Color::BLACK);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                assert_eq!(fb.at(x, y), Color::BLACK.to_u32());
            }
        }
    }
}
