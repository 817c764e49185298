//! Forward/inverse transforms between named coordinate reference systems.
//!
//! The projector only needs an opaque `transform(from, to, x, y)` capability,
//! expressed by [`CrsTransform`]. [`SphericalMercator`] implements it for the
//! two systems the radar composites use:
//! - EPSG:4326: geographic lon/lat in degrees
//! - EPSG:3857 (a.k.a. EPSG:900913): spherical Web Mercator in meters

use std::f64::consts::PI;

use radar_common::{CrsCode, RadarError, RadarResult};

/// Sphere radius used by spherical Web Mercator (WGS84 semi-major axis).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// A pure, deterministic transform between two CRSs.
pub trait CrsTransform: Send + Sync {
    fn transform(&self, from: CrsCode, to: CrsCode, x: f64, y: f64) -> RadarResult<(f64, f64)>;
}

/// Closed-form transforms between EPSG:4326 and EPSG:3857.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalMercator;

impl SphericalMercator {
    /// Geographic (lon, lat) in degrees to Web Mercator meters.
    pub fn forward(lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() >= 90.0 {
            return None;
        }
        let x = EARTH_RADIUS * lon.to_radians();
        let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        Some((x, y))
    }

    /// Web Mercator meters to geographic (lon, lat) in degrees.
    pub fn inverse(x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = (y / EARTH_RADIUS).sinh().atan().to_degrees();
        Some((lon, lat))
    }
}

impl CrsTransform for SphericalMercator {
    fn transform(&self, from: CrsCode, to: CrsCode, x: f64, y: f64) -> RadarResult<(f64, f64)> {
        let result = match (from, to) {
            (a, b) if a == b => Some((x, y)),
            (CrsCode::Epsg4326, CrsCode::Epsg3857) => Self::forward(x, y),
            (CrsCode::Epsg3857, CrsCode::Epsg4326) => Self::inverse(x, y),
            _ => None,
        };

        result.ok_or_else(|| RadarError::Transform {
            from: from.to_string(),
            to: to.to_string(),
            x,
            y,
            message: "coordinate outside the domain of the projection".to_string(),
        })
    }
}
