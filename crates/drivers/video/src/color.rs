//! Pixel colors
//!
//! Uses u32 ARGB format internally. No floating point.

/// ARGB color (0xAARRGGBB format)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0xFF000000);
    pub const WHITE: Self = Self(0xFFFFFFFF);

    /// Create from ARGB components
    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create opaque RGB color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Create from raw u32 (0xAARRGGBB)
    #[inline]
    pub const fn from_u32(val: u32) -> Self {
        Self(val)
    }

    /// Get alpha component
    #[inline]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Get red component
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Get green component
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Get blue component
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Convert to raw u32
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let c = Color::argb(0xFF, 0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0xFF123456);
        assert_eq!(c.a(), 0xFF);
        assert_eq!(c.r(), 0x12);
        assert_eq!(c.g(), 0x34);
        assert_eq!(c.b(), 0x56);
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(0, 0, 0), Color::BLACK);
        assert_eq!(Color::rgb(255, 255, 255), Color::WHITE);
    }
}
