//! Per-pixel intensity map.

use radar_common::{PixelPoint, RadarError, RadarResult};
use serde::Serialize;

use crate::palette::PaletteEntry;

/// Dense `width * height` table of classified pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityMap {
    width: u32,
    height: u32,
    entries: Vec<PaletteEntry>,
}

impl IntensityMap {
    pub(crate) fn new(width: u32, height: u32, entries: Vec<PaletteEntry>) -> Self {
        debug_assert_eq!(entries.len(), width as usize * height as usize);
        Self {
            width,
            height,
            entries,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All entries, `y * width + x` indexed.
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Entry at integer column/row, `None` outside the map.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<PaletteEntry> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.entries[y as usize * self.width as usize + x as usize])
    }

    /// Entry for the pixel containing `p`.
    pub fn at(&self, p: PixelPoint) -> RadarResult<PaletteEntry> {
        let out_of_range = || RadarError::IndexOutOfRange {
            operation: "intensity",
            x: p.x,
            y: p.y,
            width: self.width,
            height: self.height,
        };

        if !(p.x >= 0.0 && p.y >= 0.0) {
            return Err(out_of_range());
        }
        let (x, y) = (p.x.floor(), p.y.floor());
        if x >= self.width as f64 || y >= self.height as f64 {
            return Err(out_of_range());
        }
        self.get(x as u32, y as u32).ok_or_else(out_of_range)
    }

    /// Pixel counts per intensity group.
    pub fn summary(&self) -> IntensitySummary {
        let mut summary = IntensitySummary::default();
        for entry in &self.entries {
            match entry.group {
                1..=4 => {
                    summary.groups[entry.group as usize - 1] += 1;
                    summary.max_value = summary.max_value.max(entry.value);
                }
                _ => summary.no_reading += 1,
            }
        }
        summary
    }
}

/// Aggregate counts over an [`IntensityMap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntensitySummary {
    /// Pixels without a reading
    pub no_reading: usize,
    /// Pixels per group; index 0 holds group 1
    pub groups: [usize; 4],
    /// Strongest value present, 0 if none
    pub max_value: u8,
}

impl IntensitySummary {
    /// Number of pixels carrying a reading.
    pub fn readings(&self) -> usize {
        self.groups.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IntensityMap {
        IntensityMap::new(
            2,
            2,
            vec![
                PaletteEntry::new([211, 0, 0], 51, 4),
                PaletteEntry::NO_READING,
                PaletteEntry::new([8, 70, 254], 15, 1),
                PaletteEntry::new([8, 70, 254], 15, 1),
            ],
        )
    }

    #[test]
    fn test_get_and_at() {
        let map = sample();
        assert_eq!(map.get(0, 0).unwrap().value, 51);
        assert_eq!(map.get(1, 0), Some(PaletteEntry::NO_READING));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.at(PixelPoint::new(1.7, 1.2)).unwrap().group, 1);
        assert!(matches!(
            map.at(PixelPoint::at(0, 2)),
            Err(RadarError::IndexOutOfRange { operation: "intensity", .. })
        ));
        assert!(map.at(PixelPoint::new(-1.0, 0.0)).is_err());
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.no_reading, 1);
        assert_eq!(summary.groups, [2, 0, 0, 1]);
        assert_eq!(summary.readings(), 3);
        assert_eq!(summary.max_value, 51);
    }
}
