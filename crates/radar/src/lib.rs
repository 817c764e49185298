//! Radar composite classification.
//!
//! Turns a color-coded radar composite into a per-pixel intensity lookup:
//! - [`Palette`]: exact color → intensity table
//! - [`RadarClassifier`]: loads a raster, builds the [`IntensityMap`] and
//!   sanitizes the raster
//! - [`ClassifierConfig`]: geometry, region of interest and palette

pub mod classifier;
pub mod config;
pub mod intensity;
pub mod palette;

pub use classifier::RadarClassifier;
pub use config::{ClassifierConfig, ConfigError};
pub use intensity::{IntensityMap, IntensitySummary};
pub use palette::{Palette, PaletteEntry, PaletteError, ARSO_ENTRIES};
