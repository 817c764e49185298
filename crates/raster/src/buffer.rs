//! Decoded RGBA raster.

use radar_common::{Pixel, PixelPoint, RadarError, RadarResult};

use crate::codec;

/// A decoded raster: `width * height` pixels, 4 bytes each, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA buffer. Fails with `Decode` if the buffer length does
    /// not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> RadarResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RadarError::Decode(format!(
                "RGBA buffer has {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode PNG bytes into an RGBA raster.
    ///
    /// Palette, grayscale and RGB inputs are expanded to RGBA. Checksums
    /// are not verified.
    pub fn decode_png(bytes: &[u8]) -> RadarResult<Self> {
        let decoded = codec::decode_rgba(bytes)?;
        Self::from_rgba(decoded.width, decoded.height, decoded.rgba)
    }

    /// Encode the raster as PNG bytes.
    pub fn encode_png(&self) -> RadarResult<Vec<u8>> {
        codec::encode_rgba(self.width, self.height, &self.data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes, one `width * 4` row after another.
    pub fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of the pixel containing `p`, if it lies inside the raster.
    pub fn offset(&self, p: PixelPoint) -> Option<usize> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let x = p.x.floor();
        let y = p.y.floor();
        if x >= self.width as f64 || y >= self.height as f64 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Checked pixel read.
    pub fn pixel(&self, p: PixelPoint) -> RadarResult<Pixel> {
        let idx = self.offset(p).ok_or(RadarError::IndexOutOfRange {
            operation: "pixel",
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        })?;
        Ok(Pixel::from_rgba(&self.data[idx..idx + 4]))
    }
}
