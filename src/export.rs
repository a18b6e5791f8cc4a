// THEORY:
// The `export` module turns a pixel-to-millimeter mapping into a portable
// point-cloud document. It is a pure formatter: callers supply measured
// points keyed by their pixel coordinates, and the module produces a
// timestamped JSON document with a stable, row-major point ordering so two
// exports of the same data are byte-comparable apart from the timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The only unit this exporter speaks.
pub const UNITS_MM: &str = "mm";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize point cloud: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write point cloud: {0}")]
    Io(#[from] std::io::Error),
}

/// A measured point in millimeter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MillimeterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One exported point: where it was seen and where it is in space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCloudEntry {
    #[serde(rename = "pixelX")]
    pub pixel_x: u32,
    #[serde(rename = "pixelY")]
    pub pixel_y: u32,
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
}

/// The full export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudDocument {
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub units: String,
    #[serde(rename = "pointCount")]
    pub point_count: usize,
    pub points: Vec<PointCloudEntry>,
}

impl PointCloudDocument {
    /// Builds a document from points keyed by (pixel_x, pixel_y).
    ///
    /// Entries are ordered row-major (by y, then x) regardless of the map's
    /// own key order.
    pub fn from_points(points: &BTreeMap<(u32, u32), MillimeterPoint>) -> Self {
        let mut entries: Vec<PointCloudEntry> = points
            .iter()
            .map(|(&(pixel_x, pixel_y), millimeters)| PointCloudEntry {
                pixel_x,
                pixel_y,
                x_mm: millimeters.x,
                y_mm: millimeters.y,
                z_mm: millimeters.z,
            })
            .collect();
        entries.sort_by_key(|entry| (entry.pixel_y, entry.pixel_x));

        Self {
            created_at: Utc::now(),
            units: UNITS_MM.to_string(),
            point_count: entries.len(),
            points: entries,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &str) -> Result<(), ExportError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
