//! Trajectory Builder — reconstructs a uniformly-sampled camera trajectory
//! from a project's declarative timeline.

use qa_scenario_model::{ContinuousTransformPoint, ProjectDescription, Segment, Transform};

/// A single reconstructed camera state: frame-normalized center and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSample {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Which timeline representation the trajectory was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrajectorySource {
    Continuous,
    Segments,
    None,
}

/// The reconstructed trajectory plus provenance notes for the scenario
/// evaluation's note list.
#[derive(Debug, Clone)]
pub struct TrajectoryResult {
    pub samples: Vec<CameraSample>,
    pub source: TrajectorySource,
    pub notes: Vec<String>,
}

/// Builds a camera trajectory at `sample_rate_hz` from a project's timeline.
pub fn build_trajectory(project: &ProjectDescription, sample_rate_hz: f64) -> TrajectoryResult {
    let duration = match project.effective_duration() {
        Some(d) if d > 0.0 => d,
        _ => {
            return TrajectoryResult {
                samples: Vec::new(),
                source: TrajectorySource::None,
                notes: vec!["Timeline duration is missing or zero".to_string()],
            };
        }
    };

    let times = sample_times(duration, sample_rate_hz);

    if let Some(points) = &project.timeline.continuous_transforms {
        if points.len() >= 2 {
            let samples = sample_continuous_transforms(points, &times);
            return TrajectoryResult {
                samples,
                source: TrajectorySource::Continuous,
                notes: vec!["Camera sampled from timeline.continuousTransforms".to_string()],
            };
        }
    }

    if let Some(track) = project.timeline.transform_track() {
        if !track.data.segments.is_empty() {
            let samples = sample_segments(&track.data.segments, &times);
            return TrajectoryResult {
                samples,
                source: TrajectorySource::Segments,
                notes: vec!["Camera sampled from timeline track segments".to_string()],
            };
        }
    }

    TrajectoryResult {
        samples: Vec::new(),
        source: TrajectorySource::None,
        notes: vec!["No camera track data available".to_string()],
    }
}

fn sample_times(duration: f64, sample_rate_hz: f64) -> Vec<f64> {
    let count = (duration * sample_rate_hz).ceil() as i64;
    (0..=count)
        .map(|k| (k as f64 / sample_rate_hz).min(duration))
        .collect()
}

fn sample_continuous_transforms(
    points: &[ContinuousTransformPoint],
    times: &[f64],
) -> Vec<CameraSample> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    times
        .iter()
        .map(|&t| {
            let (x, y, zoom) = interpolate_continuous(&sorted, t);
            clamp_camera_sample(t, x, y, zoom)
        })
        .collect()
}

fn interpolate_continuous(sorted: &[ContinuousTransformPoint], t: f64) -> (f64, f64, f64) {
    let first = sorted.first().expect("caller guarantees >= 2 points");
    let last = sorted.last().expect("caller guarantees >= 2 points");

    if t <= first.time {
        return (first.transform.center.x, first.transform.center.y, first.transform.zoom);
    }
    if t >= last.time {
        return (last.transform.center.x, last.transform.center.y, last.transform.zoom);
    }

    let idx = sorted.partition_point(|p| p.time <= t);
    let before = &sorted[idx - 1];
    let after = &sorted[idx];
    let span = after.time - before.time;
    let frac = if span > 1e-9 { (t - before.time) / span } else { 0.0 };
    (
        before.transform.center.x + (after.transform.center.x - before.transform.center.x) * frac,
        before.transform.center.y + (after.transform.center.y - before.transform.center.y) * frac,
        before.transform.zoom + (after.transform.zoom - before.transform.zoom) * frac,
    )
}

fn sample_segments(segments: &[Segment], times: &[f64]) -> Vec<CameraSample> {
    let mut sorted: Vec<&Segment> = segments.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut cursor = 0usize;
    let mut last = Transform::default();
    let mut out = Vec::with_capacity(times.len());

    for &t in times {
        while cursor + 1 < sorted.len() && t >= sorted[cursor].end_time {
            cursor += 1;
        }

        let segment = sorted[cursor];
        let is_final = cursor == sorted.len() - 1;
        let active = if is_final {
            segment.start_time <= t && t <= segment.end_time
        } else {
            segment.start_time <= t && t < segment.end_time
        };

        let (x, y, zoom) = if active {
            let raw_progress =
                (t - segment.start_time) / (segment.end_time - segment.start_time).max(1e-3);
            let eased = segment
                .easing
                .apply(raw_progress, segment.end_time - segment.start_time)
                .clamp(0.0, 1.0);
            let start = &segment.start_transform;
            let end = &segment.end_transform;
            let x = start.center.x + (end.center.x - start.center.x) * eased;
            let y = start.center.y + (end.center.y - start.center.y) * eased;
            let zoom = start.zoom + (end.zoom - start.zoom) * eased;
            last = Transform {
                center: qa_scenario_model::Point2D::new(x, y),
                zoom,
            };
            (x, y, zoom)
        } else {
            (last.center.x, last.center.y, last.zoom)
        };

        out.push(clamp_camera_sample(t, x, y, zoom));
    }

    out
}

fn clamp_camera_sample(time: f64, x: f64, y: f64, zoom: f64) -> CameraSample {
    if zoom > 1.0 {
        let half = 0.5 / zoom;
        CameraSample {
            time,
            x: x.clamp(half, 1.0 - half),
            y: y.clamp(half, 1.0 - half),
            zoom,
        }
    } else {
        CameraSample { time, x, y, zoom }
    }
}
