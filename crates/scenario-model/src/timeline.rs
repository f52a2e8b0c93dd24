//! Camera timeline data: segments, easing descriptors, and continuous
//! transform samples.
//!
//! A project's camera animation is expressed one of two ways: a sparse list
//! of [`Segment`]s (each animating from one [`Transform`] to another under an
//! [`Easing`]), or a dense, pre-sampled list of [`ContinuousTransformPoint`]s.
//! The trajectory builder in `qa-metrics-core` prefers the latter when
//! present.

use crate::point::Point2D;
use serde::{Deserialize, Serialize};

/// Camera center and zoom level at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub center: Point2D,
    pub zoom: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            center: Point2D::new(0.5, 0.5),
            zoom: 1.0,
        }
    }
}

/// A tagged easing descriptor. Unknown tags must degrade to [`Easing::Linear`]
/// at the deserialization boundary (see [`Easing::from_tag`]) rather than
/// failing to parse, since new tags may appear in newer project files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier {
        #[serde(default = "default_bezier_p1x")]
        p1x: f64,
        #[serde(default = "default_bezier_p1y")]
        p1y: f64,
        #[serde(default = "default_bezier_p2x")]
        p2x: f64,
        #[serde(default = "default_bezier_p2y")]
        p2y: f64,
    },
    Spring {
        #[serde(default = "default_damping_ratio")]
        damping_ratio: f64,
        #[serde(default = "default_response")]
        response: f64,
    },
}

fn default_bezier_p1x() -> f64 {
    0.25
}
fn default_bezier_p1y() -> f64 {
    0.1
}
fn default_bezier_p2x() -> f64 {
    0.25
}
fn default_bezier_p2y() -> f64 {
    1.0
}
fn default_damping_ratio() -> f64 {
    1.0
}
fn default_response() -> f64 {
    0.8
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

impl Easing {
    /// Parses a raw tag string from a loosely-typed project file, degrading
    /// any tag not recognized by this build to [`Easing::Linear`].
    pub fn from_tag(tag: &str) -> Easing {
        match tag {
            "easeIn" => Easing::EaseIn,
            "easeOut" => Easing::EaseOut,
            "easeInOut" => Easing::EaseInOut,
            "cubicBezier" => Easing::CubicBezier {
                p1x: default_bezier_p1x(),
                p1y: default_bezier_p1y(),
                p2x: default_bezier_p2x(),
                p2y: default_bezier_p2y(),
            },
            "spring" => Easing::Spring {
                damping_ratio: default_damping_ratio(),
                response: default_response(),
            },
            _ => Easing::Linear,
        }
    }

    /// Applies the easing to a raw progress `p` within a segment of duration
    /// `segment_duration_sec`, returning eased progress in `[0, 1]`.
    pub fn apply(&self, p: f64, segment_duration_sec: f64) -> f64 {
        match self {
            Easing::Linear => p,
            Easing::EaseIn => p * p,
            Easing::EaseOut => p * (2.0 - p),
            Easing::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    -1.0 + (4.0 - 2.0 * p) * p
                }
            }
            Easing::CubicBezier { p1x, p1y, p2x, p2y } => {
                cubic_bezier_value(p, *p1x, *p1y, *p2x, *p2y)
            }
            Easing::Spring {
                damping_ratio,
                response,
            } => spring_value(p, *damping_ratio, *response, segment_duration_sec),
        }
    }
}

fn bezier_component(u: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * c1 + 3.0 * inv * u * u * c2 + u * u * u
}

fn bezier_derivative(u: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * c1 + 6.0 * inv * u * (c2 - c1) + 3.0 * u * u * (1.0 - c2)
}

/// Inverts the Bezier's x(u) = p via Newton iteration and evaluates y(u).
fn cubic_bezier_value(p: f64, p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> f64 {
    let mut u = p;
    for _ in 0..10 {
        let x = bezier_component(u, p1x, p2x) - p;
        if x.abs() < 1e-4 {
            break;
        }
        let dx = bezier_derivative(u, p1x, p2x);
        if dx.abs() < 1e-4 {
            break;
        }
        u -= x / dx;
    }
    bezier_component(u, p1y, p2y).clamp(0.0, 1.0)
}

fn spring_raw(zeta: f64, omega: f64, tau: f64) -> f64 {
    if zeta >= 1.0 {
        1.0 - (1.0 + zeta * omega * tau) * (-zeta * omega * tau).exp()
    } else {
        let omega_d = omega * (1.0 - zeta * zeta).max(1e-8).sqrt();
        1.0 - (-zeta * omega * tau).exp()
            * ((omega_d * tau).cos() + (zeta * omega / omega_d) * (omega_d * tau).sin())
    }
}

fn spring_value(p: f64, damping_ratio: f64, response: f64, segment_duration_sec: f64) -> f64 {
    let omega = std::f64::consts::TAU / response.max(0.01);
    let duration = segment_duration_sec.max(1e-3);
    let tau = p * duration;
    let numerator = spring_raw(damping_ratio, omega, tau);
    let denominator = spring_raw(damping_ratio, omega, duration);
    if denominator.abs() < 1e-6 {
        p
    } else {
        numerator / denominator
    }
}

/// A declarative animation from `start_transform` to `end_transform` across
/// `[start_time, end_time]`, governed by `easing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub start_transform: Transform,
    #[serde(default)]
    pub end_transform: Transform,
    #[serde(default)]
    pub easing: Easing,
}

/// A single pre-sampled transform at an absolute time, used when a project
/// supplies a continuous camera trajectory instead of discrete segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousTransformPoint {
    pub time: f64,
    #[serde(default)]
    pub transform: Transform,
}

/// A single timeline track entry. Only tracks whose `track_type` is
/// `"transform"`, or whose `data` holds a non-empty segment list carrying
/// both a start and end transform on its first element (legacy fallback),
/// are read by the trajectory builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(rename = "type")]
    pub track_type: String,
    #[serde(default)]
    pub data: TrackData,
}

/// The `data` payload of a [`Track`]. Represented loosely since only the
/// segment list matters to the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackData {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// The camera portion of a project description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub continuous_transforms: Option<Vec<ContinuousTransformPoint>>,
}

impl Timeline {
    /// The transform track, chosen per the deterministic priority described
    /// for the trajectory builder: an explicit `"transform"` track first,
    /// else the first track whose data holds a non-empty segment list with
    /// both endpoints set on its first element.
    pub fn transform_track(&self) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|track| track.track_type == "transform")
            .or_else(|| {
                self.tracks.iter().find(|track| {
                    track
                        .data
                        .segments
                        .first()
                        .is_some()
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_easing_is_identity() {
        let easing = Easing::Linear;
        assert_eq!(easing.apply(0.0, 1.0), 0.0);
        assert_eq!(easing.apply(0.5, 1.0), 0.5);
        assert_eq!(easing.apply(1.0, 1.0), 1.0);
    }

    #[test]
    fn ease_in_out_crosses_at_midpoint() {
        let easing = Easing::EaseInOut;
        assert!((easing.apply(0.5, 1.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn easing_endpoints_hold_for_all_variants() {
        let easings = vec![
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier {
                p1x: 0.25,
                p1y: 0.1,
                p2x: 0.25,
                p2y: 1.0,
            },
            Easing::Spring {
                damping_ratio: 0.4,
                response: 0.6,
            },
        ];
        for easing in easings {
            assert!(easing.apply(0.0, 1.5).abs() < 1e-4, "{easing:?} at p=0");
            assert!((easing.apply(1.0, 1.5) - 1.0).abs() < 1e-4, "{easing:?} at p=1");
        }
    }

    #[test]
    fn unknown_tag_degrades_to_linear() {
        assert_eq!(Easing::from_tag("nonexistent"), Easing::Linear);
    }

    #[test]
    fn spring_degenerate_denominator_falls_back_to_linear_progress() {
        // response so large that omega ~ 0, driving the raw spring value to
        // near zero at both numerator and denominator.
        let e = spring_value(0.3, 1.0, 1_000_000.0, 1.0);
        assert!((e - 0.3).abs() < 1e-6);
    }

    #[test]
    fn transform_track_prefers_explicit_type_over_legacy_segments() {
        let timeline = Timeline {
            duration: Some(3.0),
            tracks: vec![
                Track {
                    track_type: "legacy".to_string(),
                    data: TrackData {
                        segments: vec![Segment {
                            start_time: 0.0,
                            end_time: 1.0,
                            start_transform: Transform::default(),
                            end_transform: Transform::default(),
                            easing: Easing::Linear,
                        }],
                    },
                },
                Track {
                    track_type: "transform".to_string(),
                    data: TrackData::default(),
                },
            ],
            continuous_transforms: None,
        };
        assert_eq!(timeline.transform_track().unwrap().track_type, "transform");
    }

    proptest::proptest! {
        #[test]
        fn cubic_bezier_progress_stays_within_unit_range(
            p in 0.0f64..=1.0,
            p1x in 0.0f64..=1.0,
            p1y in -1.0f64..=2.0,
            p2x in 0.0f64..=1.0,
            p2y in -1.0f64..=2.0,
        ) {
            let easing = Easing::CubicBezier { p1x, p1y, p2x, p2y };
            let e = easing.apply(p, 1.0);
            proptest::prop_assert!((0.0..=1.0).contains(&e));
        }
    }
}
