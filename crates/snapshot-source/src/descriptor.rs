//! Snapshot descriptors and timeline parsing.

use chrono::{DateTime, Utc};
use radar_common::{parse_valid_time, GeoBounds};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// One raw entry of the INCA timeline JSON. Every field is a string.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub valid: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub date: String,
    pub path: String,
    #[serde(default)]
    pub hhmm: String,
    #[serde(default)]
    pub bbox: Option<String>,
}

/// A radar snapshot available for download.
///
/// Only `image_path` is required. The other fields are informational: they
/// are `None` when the timeline value does not parse, and dimensions are not
/// checked against the decoded raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotDescriptor {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub valid_time: Option<DateTime<Utc>>,
    /// Display date, e.g. "202405101200"
    pub date_compact: String,
    /// Display time, e.g. "1200"
    pub time_compact: String,
    /// Image path relative to the host
    pub image_path: String,
    pub mode: String,
    /// Extent as published with the snapshot, when parseable
    pub bbox: Option<GeoBounds>,
}

impl SnapshotDescriptor {
    /// Absolute image URL on `host` (e.g. "http://meteo.arso.gov.si").
    pub fn image_url(&self, host: &str) -> String {
        if self.image_path.starts_with("http://") || self.image_path.starts_with("https://") {
            return self.image_path.clone();
        }
        let host = host.trim_end_matches('/');
        if self.image_path.starts_with('/') {
            format!("{}{}", host, self.image_path)
        } else {
            format!("{}/{}", host, self.image_path)
        }
    }
}

impl From<TimelineEntry> for SnapshotDescriptor {
    fn from(entry: TimelineEntry) -> Self {
        let width = parse_dimension(&entry.width);
        let height = parse_dimension(&entry.height);
        if width.is_none() || height.is_none() {
            warn!(
                path = %entry.path,
                width = %entry.width,
                height = %entry.height,
                "Unparseable snapshot dimensions"
            );
        }

        // The compact display date carries the same instant at minute precision
        let valid_time = parse_valid_time(&entry.valid)
            .or_else(|_| parse_valid_time(&entry.date))
            .ok();
        if valid_time.is_none() {
            warn!(path = %entry.path, valid = %entry.valid, "Unparseable snapshot valid time");
        }

        let bbox = entry
            .bbox
            .as_deref()
            .and_then(|s| GeoBounds::from_bbox_string(s).ok());

        Self {
            width,
            height,
            valid_time,
            date_compact: entry.date,
            time_compact: entry.hhmm,
            image_path: entry.path,
            mode: entry.mode,
            bbox,
        }
    }
}

/// Lenient dimension parse: "800", " 800 " and "800.0" all give 800.
fn parse_dimension(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(v))
        .map(|v| v as u32)
}

/// Parse a timeline JSON array.
///
/// A body that is not a JSON array is an error. Elements that are not
/// entry objects (for instance lacking `path`) are logged and skipped;
/// every other entry is kept.
pub fn parse_timeline(json: &str) -> Result<Vec<SnapshotDescriptor>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;

    let descriptors = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<TimelineEntry>(value) {
            Ok(entry) => Some(SnapshotDescriptor::from(entry)),
            Err(e) => {
                warn!(index, error = %e, "Skipping timeline entry");
                None
            }
        })
        .collect();

    Ok(descriptors)
}
