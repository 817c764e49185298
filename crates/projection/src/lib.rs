//! Coordinate reference system transformations and raster georeferencing.
//!
//! Implements the CRS math from scratch without external dependencies.

pub mod projector;
pub mod transform;

pub use projector::GeoProjector;
pub use transform::{CrsTransform, SphericalMercator};
