//! Episode Detector — segments a trajectory into discrete movement episodes,
//! each annotated with a settle index when stability conditions hold.

use crate::dynamics::DynamicsSample;
use crate::trajectory::CameraSample;

const MOVING_PAN_SPEED_THRESHOLD: f64 = 0.015;
const MOVING_ZOOM_SPEED_THRESHOLD: f64 = 0.08;
const SETTLE_CENTER_DISTANCE: f64 = 0.01;
const SETTLE_ZOOM_DELTA: f64 = 0.02;
const SETTLE_PAN_SPEED: f64 = 0.012;
const SETTLE_ZOOM_SPEED: f64 = 0.05;

/// A maximal moving run, its settle point (if any), and the index bounding
/// the target window used to compute it. `settle_index = -1` denotes "never
/// settled within the search window."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Episode {
    pub start_index: usize,
    pub end_index: usize,
    pub settle_index: i64,
    pub target_end_index: usize,
}

/// Detects movement episodes over a camera trajectory and its dynamics.
/// `sample_rate_hz` is the rate the trajectory was built at.
pub fn detect_movement_episodes(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    sample_rate_hz: f64,
) -> Vec<Episode> {
    let n = camera.len();
    if n == 0 {
        return Vec::new();
    }
    let dt = 1.0 / sample_rate_hz.max(1.0);
    let lookahead = (0.25 / dt).round().max(1.0) as usize;
    let hold = ((0.20 / dt).round() as i64).max(3) as usize;

    let moving: Vec<bool> = (0..n)
        .map(|i| match dynamics_at(dynamics, i) {
            Some(d) => d.pan_speed > MOVING_PAN_SPEED_THRESHOLD || d.zoom_speed > MOVING_ZOOM_SPEED_THRESHOLD,
            None => false,
        })
        .collect();

    let mut episodes = Vec::new();
    let mut i = 0;
    while i < n {
        if !moving[i] {
            i += 1;
            continue;
        }
        let start = i;
        let mut end = i;
        while end + 1 < n && moving[end + 1] {
            end += 1;
        }

        if let Some(episode) = build_episode(camera, dynamics, start, end, lookahead, hold) {
            episodes.push(episode);
        }

        i = end + 1;
    }

    episodes
}

fn dynamics_at(dynamics: &[DynamicsSample], camera_index: usize) -> Option<&DynamicsSample> {
    if camera_index == 0 {
        None
    } else {
        dynamics.get(camera_index - 1)
    }
}

fn build_episode(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    start: usize,
    end: usize,
    lookahead: usize,
    hold: usize,
) -> Option<Episode> {
    let n = camera.len();
    let window_start = end + 1;
    if window_start >= n {
        return None;
    }
    let window_end = (window_start + lookahead).min(n - 1);
    let window = &camera[window_start..=window_end];

    let (sum_x, sum_y, sum_z) = window.iter().fold((0.0, 0.0, 0.0), |(sx, sy, sz), s| {
        (sx + s.x, sy + s.y, sz + s.zoom)
    });
    let count = window.len() as f64;
    let target = (sum_x / count, sum_y / count, sum_z / count);

    let candidate_start = window_start.min(n - 1);
    let settle_index = find_settle_index(camera, dynamics, candidate_start, n, hold, target);

    Some(Episode {
        start_index: start,
        end_index: end,
        settle_index,
        target_end_index: window_end,
    })
}

fn find_settle_index(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    candidate_start: usize,
    n: usize,
    hold: usize,
    target: (f64, f64, f64),
) -> i64 {
    if hold + 1 > n {
        return -1;
    }
    let last_candidate = n - hold - 1;
    if candidate_start as i64 > last_candidate as i64 {
        return -1;
    }

    for c in candidate_start..=last_candidate {
        if (0..hold).all(|offset| settle_predicate_holds(camera, dynamics, c + offset, target)) {
            return c as i64;
        }
    }
    -1
}

fn settle_predicate_holds(
    camera: &[CameraSample],
    dynamics: &[DynamicsSample],
    index: usize,
    target: (f64, f64, f64),
) -> bool {
    let (tx, ty, tz) = target;
    let sample = camera[index];
    let center_distance = ((sample.x - tx).powi(2) + (sample.y - ty).powi(2)).sqrt();
    let zoom_delta = (sample.zoom - tz).abs();
    let (pan_speed, zoom_speed) = match dynamics_at(dynamics, index) {
        Some(d) => (d.pan_speed, d.zoom_speed),
        None => return false,
    };

    center_distance <= SETTLE_CENTER_DISTANCE
        && zoom_delta <= SETTLE_ZOOM_DELTA
        && pan_speed <= SETTLE_PAN_SPEED
        && zoom_speed <= SETTLE_ZOOM_SPEED
}
