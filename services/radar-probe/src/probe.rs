//! One probe run: fetch the newest snapshot, classify it, query points.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use radar::{IntensitySummary, RadarClassifier};
use radar_common::DegreePoint;
use serde::Serialize;
use snapshot_source::{latest, SnapshotDescriptor, SnapshotSource};
use tracing::{info, warn};

/// A query point in degree-role coordinates, given as "x,y".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint(pub DegreePoint);

impl FromStr for QueryPoint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'x,y', got '{}'", s))?;
        let x: f64 = x.trim().parse().map_err(|_| format!("invalid x in '{}'", s))?;
        let y: f64 = y.trim().parse().map_err(|_| format!("invalid y in '{}'", s))?;
        Ok(QueryPoint(DegreePoint::new(x, y)))
    }
}

/// Intensity reported for one query point.
#[derive(Debug, Clone, Serialize)]
pub struct PointReport {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub snapshot: SnapshotDescriptor,
    pub summary: IntensitySummary,
    pub points: Vec<PointReport>,
}

/// Inputs of a probe run besides the source and classifier.
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    pub points: Vec<QueryPoint>,
    /// Where to write the sanitized PNG, if anywhere
    pub output: Option<PathBuf>,
}

pub async fn run_probe(
    source: &dyn SnapshotSource,
    classifier: &mut RadarClassifier,
    request: &ProbeRequest,
) -> Result<ProbeReport> {
    let descriptors = source
        .list_latest()
        .await
        .context("Failed to fetch snapshot timeline")?;
    let snapshot = latest(&descriptors)
        .cloned()
        .ok_or_else(|| anyhow!("Timeline contains no usable snapshots"))?;

    info!(
        valid_time = ?snapshot.valid_time,
        path = %snapshot.image_path,
        "Selected latest snapshot"
    );

    let bytes = source
        .fetch_image_bytes(&snapshot)
        .await
        .with_context(|| format!("Failed to download {}", snapshot.image_path))?;
    classifier
        .load_raster(&bytes)
        .context("Failed to load radar image")?;
    let classifier: &RadarClassifier = classifier;

    let map = classifier.intensity_map()?;
    let expected = (
        snapshot.width.unwrap_or(map.width()),
        snapshot.height.unwrap_or(map.height()),
    );
    if expected != (map.width(), map.height()) {
        warn!(
            expected_width = expected.0,
            expected_height = expected.1,
            width = map.width(),
            height = map.height(),
            "Snapshot dimensions differ from the timeline"
        );
    }
    let summary = map.summary();

    let points = request
        .points
        .iter()
        .map(|QueryPoint(p)| point_report(classifier, *p))
        .collect();

    if let Some(path) = &request.output {
        let png = classifier.serialize_raster()?;
        tokio::fs::write(path, png)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote sanitized raster");
    }

    Ok(ProbeReport {
        snapshot,
        summary,
        points,
    })
}

fn point_report(classifier: &RadarClassifier, p: DegreePoint) -> PointReport {
    let mut report = PointReport {
        x: p.x,
        y: p.y,
        pixel: None,
        value: None,
        group: None,
        error: None,
    };

    match classifier
        .degrees_to_pixel(p)
        .and_then(|pixel| Ok((pixel, classifier.intensity(pixel)?)))
    {
        Ok((pixel, entry)) => {
            report.pixel = Some(pixel.as_tuple());
            report.value = Some(entry.value);
            report.group = Some(entry.group);
        }
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}
