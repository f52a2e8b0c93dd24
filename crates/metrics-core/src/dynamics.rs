//! Dynamics Calculator — derives pan speed, zoom speed, and jerk from a
//! camera trajectory by successive numerical differentiation.

use crate::trajectory::CameraSample;

const MIN_DT: f64 = 1e-6;

/// Pan speed, zoom speed, and jerk magnitude at a trajectory sample, aligned
/// time-wise with the camera sample it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicsSample {
    pub time: f64,
    pub pan_speed: f64,
    pub zoom_speed: f64,
    pub jerk: f64,
}

/// Computes dynamics for every sample after the first. Requires at least 4
/// camera samples; returns an empty sequence otherwise.
pub fn compute_dynamics(camera: &[CameraSample]) -> Vec<DynamicsSample> {
    if camera.len() < 4 {
        return Vec::new();
    }

    let mut velocities = Vec::with_capacity(camera.len() - 1);
    for i in 1..camera.len() {
        let dt = (camera[i].time - camera[i - 1].time).max(MIN_DT);
        let vx = (camera[i].x - camera[i - 1].x) / dt;
        let vy = (camera[i].y - camera[i - 1].y) / dt;
        let vz = (camera[i].zoom - camera[i - 1].zoom).abs() / dt;
        velocities.push((camera[i].time, dt, vx, vy, vz));
    }

    let mut accelerations = vec![(0.0_f64, 0.0_f64); velocities.len()];
    for i in 1..velocities.len() {
        let dt = velocities[i].1;
        let ax = (velocities[i].2 - velocities[i - 1].2) / dt;
        let ay = (velocities[i].3 - velocities[i - 1].3) / dt;
        accelerations[i] = (ax, ay);
    }

    velocities
        .iter()
        .enumerate()
        .map(|(i, &(time, dt, vx, vy, vz))| {
            let pan_speed = (vx * vx + vy * vy).sqrt();
            let jerk = if i >= 2 {
                let (ax, ay) = accelerations[i];
                let (ax_prev, ay_prev) = accelerations[i - 1];
                ((ax - ax_prev).powi(2) + (ay - ay_prev).powi(2)).sqrt() / dt
            } else {
                0.0
            };
            DynamicsSample {
                time,
                pan_speed,
                zoom_speed: vz,
                jerk,
            }
        })
        .collect()
}

/// Finds the dynamics sample nearest in time to `time`, breaking ties toward
/// the earlier sample. Returns `None` for an empty sequence.
pub fn nearest_dynamics(dynamics: &[DynamicsSample], time: f64) -> Option<&DynamicsSample> {
    dynamics.iter().fold(None, |best, sample| match best {
        None => Some(sample),
        Some(current) => {
            let current_dist = (current.time - time).abs();
            let candidate_dist = (sample.time - time).abs();
            if candidate_dist < current_dist {
                Some(sample)
            } else {
                Some(current)
            }
        }
    })
}
