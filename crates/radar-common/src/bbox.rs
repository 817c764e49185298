//! Bounding box types for degree space and pixel space.

use serde::{Deserialize, Serialize};

use crate::point::{DegreePoint, PixelPoint};

/// Geographic extent of a raster, expressed in the degree-role CRS.
///
/// `min_*` is the south-west corner, `max_*` the north-east corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GeoBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_corners(sw: DegreePoint, ne: DegreePoint) -> Self {
        Self::new(sw.x, sw.y, ne.x, ne.y)
    }

    /// Parse a comma separated "minx,miny,maxx,maxy" string.
    pub fn from_bbox_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self::new(
            parse(parts[0])?,
            parse(parts[1])?,
            parse(parts[2])?,
            parse(parts[3])?,
        ))
    }

    pub fn sw(&self) -> DegreePoint {
        DegreePoint::new(self.min_x, self.min_y)
    }

    pub fn ne(&self) -> DegreePoint {
        DegreePoint::new(self.max_x, self.max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Inclusive pixel-space rectangle marking the region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl PixelBounds {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bounds covering a whole `width` x `height` raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: PixelPoint) -> bool {
        self.x1 as f64 <= p.x
            && p.x <= self.x2 as f64
            && self.y1 as f64 <= p.y
            && p.y <= self.y2 as f64
    }

    /// Integer variant of [`contains`](Self::contains) for raster scans.
    #[inline]
    pub fn contains_index(&self, x: u32, y: u32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// Whether row `y` intersects the rectangle at all.
    #[inline]
    pub fn contains_row(&self, y: u32) -> bool {
        self.y1 <= y && y <= self.y2
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
