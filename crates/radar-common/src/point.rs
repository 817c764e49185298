//! Coordinate pairs tagged with the space they live in.
//!
//! A radar composite is addressed in three spaces:
//! - pixel space: column/row of the raster, (0,0) = top left
//! - meter space: coordinates of the meter-role CRS
//! - degree space: coordinates of the degree-role CRS
//!
//! The space is a type parameter, so converting between spaces always goes
//! through an explicit projection call.

use std::fmt;
use std::marker::PhantomData;

/// Marker trait for a coordinate space.
pub trait Space: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Short name used in error messages and logs.
    const NAME: &'static str;
}

/// Raster pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpace;

/// Meter-role CRS space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meters;

/// Degree-role CRS space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degrees;

impl Space for PixelSpace {
    const NAME: &'static str = "pixel";
}

impl Space for Meters {
    const NAME: &'static str = "meters";
}

impl Space for Degrees {
    const NAME: &'static str = "degrees";
}

/// A pair of real-valued coordinates in space `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S: Space> {
    pub x: f64,
    pub y: f64,
    space: PhantomData<S>,
}

pub type PixelPoint = Point<PixelSpace>;
pub type MeterPoint = Point<Meters>;
pub type DegreePoint = Point<Degrees>;

impl<S: Space> Point<S> {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Name of the space this point lives in.
    pub fn space_name(&self) -> &'static str {
        S::NAME
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl PixelPoint {
    /// Pixel point at an integer column/row.
    pub fn at(x: u32, y: u32) -> Self {
        Self::new(x as f64, y as f64)
    }
}

impl<S: Space> From<(f64, f64)> for Point<S> {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl<S: Space> fmt::Display for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) [{}]", self.x, self.y, S::NAME)
    }
}
