//! Metric Aggregator — combines trajectories, dynamics, episodes, and
//! optional cursor/frame-analysis data into the six headline metrics.

use crate::dynamics::{nearest_dynamics, DynamicsSample};
use crate::episodes::Episode;
use crate::percentile::percentile_of;
use crate::trajectory::CameraSample;
use qa_scenario_model::{interpolate_cursor, CursorSample, FrameAnalysisEntry, MetricSet};

const READABLE_CHANGE_AMOUNT_STRICT: f64 = 0.12;
const READABLE_SIMILARITY_STRICT: f64 = 0.85;
const READABLE_CHANGE_AMOUNT_RELAXED: f64 = 0.18;

/// The computed metric set plus provenance notes.
#[derive(Debug, Clone, Default)]
pub struct MetricsResult {
    pub metrics: MetricSet,
    pub notes: Vec<String>,
}

/// Computes all six headline metrics for one scenario.
pub fn compute_metrics(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    episodes: &[Episode],
    cursor: Option<&[CursorSample]>,
    frame_analysis_cache: Option<&[FrameAnalysisEntry]>,
    duration: f64,
) -> MetricsResult {
    let mut notes = Vec::new();

    let transition_settling_time_p95_sec = settling_time_p95(camera, episodes);
    let overshoot_ratio_p95 = overshoot_ratio_p95(camera, episodes);
    let (camera_jerk_p95, camera_jerk_p99) = jerk_percentiles(dynamics);

    let cursor_camera_alignment_error_p95 = match cursor {
        Some(samples) if !samples.is_empty() => {
            alignment_error_p95(camera, samples)
        }
        _ => {
            notes.push("Cursor streams not found; cursor alignment metric skipped".to_string());
            None
        }
    };

    let (text_readability_retention_score, readability_note) =
        readability_retention_score(camera, dynamics, frame_analysis_cache, duration);
    if let Some(note) = readability_note {
        notes.push(note);
    }

    MetricsResult {
        metrics: MetricSet {
            transition_settling_time_p95_sec,
            overshoot_ratio_p95,
            camera_jerk_p95,
            camera_jerk_p99,
            cursor_camera_alignment_error_p95,
            text_readability_retention_score,
        },
        notes,
    }
}

fn settling_time_p95(camera: &[CameraSample], episodes: &[Episode]) -> Option<f64> {
    let elapsed: Vec<f64> = episodes
        .iter()
        .filter_map(|ep| {
            if ep.settle_index < 0 {
                return None;
            }
            let elapsed = (camera[ep.settle_index as usize].time - camera[ep.start_index].time)
                .max(0.0);
            (elapsed > 0.0).then_some(elapsed)
        })
        .collect();
    percentile_of(&elapsed, 95.0)
}

fn episode_target(camera: &[CameraSample], episode: &Episode) -> (f64, f64, f64) {
    let window = &camera[episode.end_index + 1..=episode.target_end_index];
    let (sx, sy, sz) = window.iter().fold((0.0, 0.0, 0.0), |(sx, sy, sz), s| {
        (sx + s.x, sy + s.y, sz + s.zoom)
    });
    let count = window.len() as f64;
    (sx / count, sy / count, sz / count)
}

fn overshoot_ratio_p95(camera: &[CameraSample], episodes: &[Episode]) -> Option<f64> {
    let ratios: Vec<f64> = episodes
        .iter()
        .filter_map(|ep| {
            if ep.settle_index < 0 || ep.settle_index as usize <= ep.start_index {
                return None;
            }
            let settle = ep.settle_index as usize;
            let start = camera[ep.start_index];
            let (tx, ty, tz) = episode_target(camera, ep);

            let ux = tx - start.x;
            let uy = ty - start.y;
            let d = (ux * ux + uy * uy).sqrt();
            let center_ratio = if d > 1e-5 {
                let (unit_x, unit_y) = (ux / d, uy / d);
                let max_projection = (ep.start_index..=settle)
                    .map(|i| (camera[i].x - start.x) * unit_x + (camera[i].y - start.y) * unit_y)
                    .fold(f64::MIN, f64::max);
                (max_projection - d).max(0.0) / d
            } else {
                0.0
            };

            let delta = tz - start.zoom;
            let zoom_ratio = if delta.abs() > 1e-4 {
                if delta > 0.0 {
                    let max_zoom = (ep.start_index..=settle)
                        .map(|i| camera[i].zoom)
                        .fold(f64::MIN, f64::max);
                    (max_zoom - tz).max(0.0) / delta.abs()
                } else {
                    let min_zoom = (ep.start_index..=settle)
                        .map(|i| camera[i].zoom)
                        .fold(f64::MAX, f64::min);
                    (tz - min_zoom).max(0.0) / delta.abs()
                }
            } else {
                0.0
            };

            Some(center_ratio.max(zoom_ratio))
        })
        .collect();
    percentile_of(&ratios, 95.0)
}

fn jerk_percentiles(dynamics: &[DynamicsSample]) -> (Option<f64>, Option<f64>) {
    let positive_jerk: Vec<f64> = dynamics
        .iter()
        .map(|d| d.jerk)
        .filter(|&j| j > 0.0)
        .collect();
    (
        percentile_of(&positive_jerk, 95.0),
        percentile_of(&positive_jerk, 99.0),
    )
}

/// Interpolates camera state at an arbitrary time, saturating outside range.
pub fn interpolate_camera(camera: &[CameraSample], time: f64) -> Option<CameraSample> {
    if camera.is_empty() {
        return None;
    }
    if time <= camera[0].time {
        return Some(camera[0]);
    }
    let last = camera.len() - 1;
    if time >= camera[last].time {
        return Some(camera[last]);
    }
    let idx = camera.partition_point(|s| s.time <= time);
    let before = camera[idx - 1];
    let after = camera[idx];
    let span = after.time - before.time;
    let t = if span > 1e-9 { (time - before.time) / span } else { 0.0 };
    Some(CameraSample {
        time,
        x: before.x + (after.x - before.x) * t,
        y: before.y + (after.y - before.y) * t,
        zoom: before.zoom + (after.zoom - before.zoom) * t,
    })
}

fn alignment_error_p95(camera: &[CameraSample], cursor: &[CursorSample]) -> Option<f64> {
    let errors: Vec<f64> = camera
        .iter()
        .filter_map(|sample| {
            let (cx, cy) = interpolate_cursor(cursor, sample.time)?;
            let half_window = 0.5 / sample.zoom.max(1.0);
            let ex = (cx - sample.x).abs() / half_window;
            let ey = (cy - sample.y).abs() / half_window;
            Some((ex * ex + ey * ey).sqrt() / std::f64::consts::SQRT_2)
        })
        .collect();
    percentile_of(&errors, 95.0)
}

fn select_readability_candidate_times(
    frame_analysis_cache: Option<&[FrameAnalysisEntry]>,
    duration: f64,
) -> (Vec<f64>, &'static str) {
    if let Some(entries) = frame_analysis_cache {
        let strict: Vec<f64> = entries
            .iter()
            .filter(|e| {
                !e.is_scrolling
                    && e.change_amount < READABLE_CHANGE_AMOUNT_STRICT
                    && e.similarity > READABLE_SIMILARITY_STRICT
            })
            .map(|e| e.time)
            .collect();
        if !strict.is_empty() {
            return (strict, "strict frame analysis candidates");
        }

        let relaxed: Vec<f64> = entries
            .iter()
            .filter(|e| !e.is_scrolling && e.change_amount < READABLE_CHANGE_AMOUNT_RELAXED)
            .map(|e| e.time)
            .collect();
        if !relaxed.is_empty() {
            return (relaxed, "relaxed frame analysis candidates");
        }
    }

    let count = duration.ceil() as i64;
    let uniform: Vec<f64> = (0..=count).map(|k| k as f64).collect();
    (uniform, "uniform 1Hz fallback sampling")
}

fn readability_retention_score(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    frame_analysis_cache: Option<&[FrameAnalysisEntry]>,
    duration: f64,
) -> (Option<f64>, Option<String>) {
    let (times, tier) = select_readability_candidate_times(frame_analysis_cache, duration);

    let scores: Vec<f64> = times
        .iter()
        .filter_map(|&t| {
            let state = interpolate_camera(camera, t)?;
            let dyn_sample = nearest_dynamics(dynamics, t);
            let (pan_speed, jerk) = dyn_sample.map_or((0.0, 0.0), |d| (d.pan_speed, d.jerk));

            let zoom_component = ((state.zoom - 1.0) / 0.8).clamp(0.0, 1.0);
            let stability_component = 1.0 - (pan_speed / 0.25).clamp(0.0, 1.0);
            let smoothness_component = 1.0 - (jerk / 20.0).clamp(0.0, 1.0);
            Some(
                (0.50 * zoom_component + 0.35 * stability_component + 0.15 * smoothness_component)
                    .clamp(0.0, 1.0),
            )
        })
        .collect();

    if scores.is_empty() {
        return (None, Some("No readability candidates available".to_string()));
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    (Some(mean), Some(format!("Readability scored from {tier}")))
}
