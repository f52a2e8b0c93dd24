//! Smart Generation QA Metrics Core
//!
//! The metric-evaluation engine: reconstructs a synthesized camera
//! trajectory from a project's timeline, derives its motion dynamics,
//! detects discrete movement episodes, aggregates six motion-quality
//! metrics, and evaluates them against configured gate thresholds.
//!
//! This crate is pure computation — no I/O beyond loading a scenario's
//! cursor stream, no platform dependencies. It is single-threaded and
//! deterministic: identical inputs and sampling rate always yield
//! bitwise-identical output modulo floating-point rounding in the
//! transcendental easing paths.

pub mod dynamics;
pub mod episodes;
pub mod gates;
pub mod metrics;
pub mod percentile;
pub mod scenario;
pub mod trajectory;

pub use dynamics::{compute_dynamics, nearest_dynamics, DynamicsSample};
pub use episodes::{detect_movement_episodes, Episode};
pub use gates::evaluate_gates;
pub use metrics::{compute_metrics, interpolate_camera, MetricsResult};
pub use percentile::{percentile, percentile_of};
pub use scenario::evaluate_scenario;
pub use trajectory::{build_trajectory, CameraSample, TrajectoryResult, TrajectorySource};
