//! Synthetic raster generators for radar composite tests.
//!
//! Rasters are built as RGBA buffers and encoded to PNG bytes with the
//! `image` crate, independently of the workspace's own encoder.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use crate::fixtures::palette::COLORS;

/// Builder for small RGBA rasters.
///
/// # Example
///
/// ```
/// use test_utils::RasterBuilder;
///
/// let png = RasterBuilder::new(2, 2)
///     .set(0, 0, [211, 0, 0, 255])
///     .to_png();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone)]
pub struct RasterBuilder {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuilder {
    /// A fully transparent black raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Fill every pixel with `rgba`.
    pub fn fill(mut self, rgba: [u8; 4]) -> Self {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        self
    }

    /// Set a single pixel. Panics if out of range.
    pub fn set(mut self, x: u32, y: u32, rgba: [u8; 4]) -> Self {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
        self
    }

    /// Raw RGBA bytes.
    pub fn rgba(&self) -> &[u8] {
        &self.data
    }

    /// Encode as an RGBA PNG.
    pub fn to_png(&self) -> Vec<u8> {
        encode_rgba_png(self.width, self.height, &self.data)
    }
}

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_rgba_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgba, width, height, ColorType::Rgba8)
        .expect("PNG encoding of test raster failed");
    out
}

/// Flip the stored CRC of the first chunk of type `kind` in PNG bytes.
///
/// Panics if no such chunk exists.
pub fn corrupt_chunk_crc(png: &mut [u8], kind: &[u8; 4]) {
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let mut len = [0u8; 4];
        len.copy_from_slice(&png[pos..pos + 4]);
        let len = u32::from_be_bytes(len) as usize;
        let crc_at = pos + 8 + len;
        if &png[pos + 4..pos + 8] == kind {
            png[crc_at] ^= 0xff;
            return;
        }
        pos = crc_at + 4;
    }
    panic!("chunk {:?} not found", String::from_utf8_lossy(kind));
}

/// Creates a raster whose columns cycle through the 15 radar palette colors
/// (opaque), with every third row semi-transparent.
///
/// Pixel (x, y) has color `COLORS[x % 15]` and alpha 255 unless `y % 3 == 2`,
/// in which case alpha is 128.
pub fn radar_stripes(width: u32, height: u32) -> RasterBuilder {
    let mut builder = RasterBuilder::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b, _, _) = COLORS[x as usize % COLORS.len()];
            let a = if y % 3 == 2 { 128 } else { 255 };
            builder = builder.set(x, y, [r, g, b, a]);
        }
    }
    builder
}
