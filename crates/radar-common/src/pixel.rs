//! RGBA pixel values read from a raster.

use serde::{Deserialize, Serialize};

/// Four 8-bit channels of a raster pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, the value of a sanitized pixel.
    pub const CLEAR: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from an RGBA byte slice (at least 4 bytes).
    #[inline]
    pub fn from_rgba(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Pack an RGB triple into a u32 for hashing.
#[inline(always)]
pub fn pack_rgb(rgb: [u8; 3]) -> u32 {
    (rgb[0] as u32) | ((rgb[1] as u32) << 8) | ((rgb[2] as u32) << 16)
}
