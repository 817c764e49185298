//! Raster buffers for radar composites.
//!
//! - [`RasterImage`]: decoded RGBA raster with checked pixel access
//! - [`codec`]: PNG decoding to RGBA and RGBA encoding

pub mod buffer;
pub mod codec;

pub use buffer::RasterImage;
