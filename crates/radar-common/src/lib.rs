//! Common types shared across the radar composite crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod pixel;
pub mod point;
pub mod time;

pub use bbox::{BboxParseError, GeoBounds, PixelBounds};
pub use crs::{CrsCode, CrsParseError};
pub use error::{RadarError, RadarResult};
pub use pixel::{pack_rgb, Pixel};
pub use point::{DegreePoint, Degrees, MeterPoint, Meters, PixelPoint, PixelSpace, Point, Space};
pub use time::{parse_valid_time, TimeParseError};
