//! Error types for raster projection and classification.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for the projection and classification core.
#[derive(Debug, Error)]
pub enum RadarError {
    /// An accessor was called before any raster was loaded.
    #[error("{operation}: no raster loaded")]
    NotLoaded { operation: &'static str },

    /// A pixel coordinate lies outside the raster extent.
    #[error("{operation}: pixel ({x}, {y}) outside raster {width}x{height}")]
    IndexOutOfRange {
        operation: &'static str,
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    /// A meter-space point lies outside the projector's bounding box.
    #[error("{operation}: point ({x}, {y}) outside bounds (rx={rx}, ry={ry})")]
    OutOfBounds {
        operation: &'static str,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
    },

    #[error("Failed to decode raster: {0}")]
    Decode(String),

    #[error("Failed to encode raster: {0}")]
    Encode(String),

    #[error("Transform {from} -> {to} failed for ({x}, {y}): {message}")]
    Transform {
        from: String,
        to: String,
        x: f64,
        y: f64,
        message: String,
    },

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),
}

impl RadarError {
    pub fn not_loaded(operation: &'static str) -> Self {
        RadarError::NotLoaded { operation }
    }
}

impl From<crate::crs::CrsParseError> for RadarError {
    fn from(err: crate::crs::CrsParseError) -> Self {
        RadarError::InvalidCrs(err.to_string())
    }
}
