//! Radar color palette.
//!
//! Each entry maps an exact RGB color of the composite to a reflectivity
//! value (dBZ) and a coarse intensity group. Matching is exact; any other
//! color is "no reading".

use std::collections::HashMap;

use radar_common::{pack_rgb, Pixel};
use serde::{Deserialize, Serialize};

/// One palette color and the intensity it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Exact RGB color in the composite
    pub color: [u8; 3],
    /// Reflectivity value (dBZ)
    pub value: u8,
    /// Coarse group, 1 = weakest .. 4 = strongest
    pub group: u8,
}

impl PaletteEntry {
    /// Sentinel for pixels without a valid reading.
    pub const NO_READING: PaletteEntry = PaletteEntry::new([0, 0, 0], 0, 0);

    pub const fn new(color: [u8; 3], value: u8, group: u8) -> Self {
        Self {
            color,
            value,
            group,
        }
    }

    /// Whether this entry is an actual reading rather than the sentinel.
    #[inline]
    pub fn is_reading(&self) -> bool {
        *self != Self::NO_READING
    }
}

/// The ARSO composite palette, strongest first.
pub const ARSO_ENTRIES: [PaletteEntry; 15] = [
    PaletteEntry::new([203, 0, 204], 57, 4),
    PaletteEntry::new([181, 3, 3], 54, 4),
    PaletteEntry::new([211, 0, 0], 51, 4),
    PaletteEntry::new([255, 62, 1], 48, 3),
    PaletteEntry::new([254, 132, 0], 45, 3),
    PaletteEntry::new([254, 198, 0], 42, 3),
    PaletteEntry::new([249, 250, 1], 39, 3),
    PaletteEntry::new([184, 250, 0], 36, 2),
    PaletteEntry::new([108, 249, 0], 33, 2),
    PaletteEntry::new([66, 235, 66], 30, 2),
    PaletteEntry::new([4, 216, 131], 27, 2),
    PaletteEntry::new([0, 220, 254], 24, 1),
    PaletteEntry::new([0, 174, 253], 21, 1),
    PaletteEntry::new([0, 120, 254], 18, 1),
    PaletteEntry::new([8, 70, 254], 15, 1),
];

/// Ordered palette entries with an exact-color lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    lookup: HashMap<u32, PaletteEntry>,
}

impl Palette {
    /// Build a palette, rejecting duplicate colors, the sentinel color and
    /// groups outside 1..=4.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        let mut lookup = HashMap::with_capacity(entries.len());

        for entry in &entries {
            if entry.color == PaletteEntry::NO_READING.color {
                return Err(PaletteError::ReservedColor);
            }
            if !(1..=4).contains(&entry.group) {
                return Err(PaletteError::InvalidGroup {
                    color: entry.color,
                    group: entry.group,
                });
            }
            if lookup.insert(pack_rgb(entry.color), *entry).is_some() {
                return Err(PaletteError::DuplicateColor(entry.color));
            }
        }

        Ok(Self { entries, lookup })
    }

    /// The ARSO composite palette.
    pub fn arso() -> Self {
        let entries = ARSO_ENTRIES.to_vec();
        let lookup = entries.iter().map(|e| (pack_rgb(e.color), *e)).collect();
        Self { entries, lookup }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact RGB lookup; unknown colors map to the sentinel.
    #[inline]
    pub fn lookup(&self, rgb: [u8; 3]) -> PaletteEntry {
        self.lookup
            .get(&pack_rgb(rgb))
            .copied()
            .unwrap_or(PaletteEntry::NO_READING)
    }

    /// Classify a raw pixel.
    ///
    /// Only fully opaque pixels carry readings: the composite's border
    /// overlay is anti-aliased with palette colors at partial alpha.
    #[inline]
    pub fn classify(&self, pixel: Pixel) -> PaletteEntry {
        if !pixel.is_opaque() {
            return PaletteEntry::NO_READING;
        }
        self.lookup(pixel.rgb())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::arso()
    }
}

impl TryFrom<Vec<PaletteEntry>> for Palette {
    type Error = PaletteError;

    fn try_from(entries: Vec<PaletteEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Palette> for Vec<PaletteEntry> {
    fn from(palette: Palette) -> Self {
        palette.entries
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Color {0:?} appears more than once")]
    DuplicateColor([u8; 3]),

    #[error("Color [0, 0, 0] is reserved for the no-reading sentinel")]
    ReservedColor,

    #[error("Color {color:?} has group {group}, expected 1..=4")]
    InvalidGroup { color: [u8; 3], group: u8 },
}
