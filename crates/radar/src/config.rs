//! Classifier configuration.
//!
//! Loaded from YAML, e.g.:
//!
//! ```yaml
//! degree_crs: "EPSG:900913"
//! meter_crs: "EPSG:4326"
//! bounds: { min_x: 44.657, min_y: 12.10, max_x: 47.407, max_y: 17.44 }
//! interest: { x1: 25, y1: 12, x2: 774, y2: 585 }
//! # palette: optional list of { color: [r, g, b], value, group }
//! ```

use std::path::Path;

use radar_common::{GeoBounds, PixelBounds};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::palette::Palette;

/// Geometry, region of interest and palette of a radar composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// CRS identifier in the degree role
    pub degree_crs: String,
    /// CRS identifier in the meter role
    pub meter_crs: String,
    /// Raster extent in degree units
    pub bounds: GeoBounds,
    /// Region of interest in pixel space
    pub interest: PixelBounds,
    #[serde(default)]
    pub palette: Palette,
}

impl ClassifierConfig {
    /// The ARSO national composite.
    ///
    /// The published bbox is slightly misaligned with the rendered image,
    /// so the corners here are hand-tuned. The CRS identifiers are passed
    /// in the roles the composite has always used: the Web Mercator code
    /// in the degree role and the geographic code in the meter role.
    pub fn arso() -> Self {
        Self {
            degree_crs: "EPSG:900913".to_string(),
            meter_crs: "EPSG:4326".to_string(),
            bounds: GeoBounds::new(44.657, 12.10, 47.407, 17.44),
            interest: PixelBounds::new(25, 12, 774, 585),
            palette: Palette::arso(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            palette_entries = config.palette.len(),
            "Loaded classifier config"
        );
        Ok(config)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::arso()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
