//! Raw mouse-move records, recording metadata, and the normalized cursor
//! samples derived from them.

use qa_common::QaError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single raw mouse-move record in device pixels, as recorded alongside a
/// screen capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMouseMove {
    pub process_time_ms: i64,
    pub x: f64,
    pub y: f64,
}

/// Display geometry captured at recording time, used to normalize raw pixel
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayGeometry {
    pub width_px: f64,
    pub height_px: f64,
}

/// Recording-time metadata needed to normalize a mouse-move stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    pub display: DisplayGeometry,
    pub process_time_start_ms: i64,
}

impl RecordingMetadata {
    pub fn load(path: &Path) -> Result<Self, QaError> {
        let content = std::fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| QaError::parse(path, e))
    }
}

/// A normalized cursor position at a point in time: `nx, ny ∈ [0, 1]`,
/// bottom-left-origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorSample {
    pub time: f64,
    pub nx: f64,
    pub ny: f64,
}

/// Loads a raw mouse-move stream from a JSON array file.
pub fn load_mouse_moves(path: &Path) -> Result<Vec<RawMouseMove>, QaError> {
    let content = std::fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| QaError::parse(path, e))
}

/// Normalizes a raw mouse-move stream against recording metadata into
/// time-sorted cursor samples.
///
/// `y` is flipped (`1 - y/height`) so top-left-origin device pixels become
/// bottom-left-origin normalized coordinates. Returns `None` if the
/// metadata's display size is non-positive, rather than producing a
/// degenerate stream driven toward a single corner.
pub fn normalize_mouse_moves(
    moves: &[RawMouseMove],
    metadata: &RecordingMetadata,
) -> Option<Vec<CursorSample>> {
    let width = metadata.display.width_px;
    let height = metadata.display.height_px;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let start_ms = metadata.process_time_start_ms;

    let mut samples: Vec<CursorSample> = moves
        .iter()
        .map(|m| CursorSample {
            time: (m.process_time_ms - start_ms) as f64 / 1000.0,
            nx: (m.x / width).clamp(0.0, 1.0),
            ny: (1.0 - m.y / height).clamp(0.0, 1.0),
        })
        .collect();
    samples.sort_by(|a, b| a.time.total_cmp(&b.time));
    Some(samples)
}

/// Interpolates the cursor position at `time` from a time-sorted sample
/// list. Saturates to the nearest endpoint outside the sample range.
/// Returns `None` for an empty sample list.
pub fn interpolate_cursor(samples: &[CursorSample], time: f64) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    if time <= samples[0].time {
        return Some((samples[0].nx, samples[0].ny));
    }
    let last = samples.len() - 1;
    if time >= samples[last].time {
        return Some((samples[last].nx, samples[last].ny));
    }

    let idx = samples.partition_point(|s| s.time <= time);
    let before = &samples[idx - 1];
    let after = &samples[idx];
    let span = after.time - before.time;
    let t = if span > 1e-9 {
        (time - before.time) / span
    } else {
        0.0
    };
    Some((
        before.nx + (after.nx - before.nx) * t,
        before.ny + (after.ny - before.ny) * t,
    ))
}
