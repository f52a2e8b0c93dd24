//! Per-scenario evaluation results: the six headline metrics, their gate
//! verdicts, and the overall pass/fail/undetermined outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a scenario's metrics were computed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Evaluated,
    Skipped,
}

/// Per-metric gate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateResult {
    Pass,
    Fail,
    InsufficientData,
}

/// Overall scenario outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Undetermined,
}

/// The six headline metrics, each nullable when the underlying computation
/// had insufficient data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub transition_settling_time_p95_sec: Option<f64>,
    pub overshoot_ratio_p95: Option<f64>,
    pub camera_jerk_p95: Option<f64>,
    pub camera_jerk_p99: Option<f64>,
    pub cursor_camera_alignment_error_p95: Option<f64>,
    pub text_readability_retention_score: Option<f64>,
}

impl MetricSet {
    /// Every metric, by its configuration key, in the fixed canonical order
    /// used for report rendering.
    pub fn as_pairs(&self) -> [(&'static str, Option<f64>); 6] {
        [
            (
                "transition_settling_time_p95_sec",
                self.transition_settling_time_p95_sec,
            ),
            ("overshoot_ratio_p95", self.overshoot_ratio_p95),
            ("camera_jerk_p95", self.camera_jerk_p95),
            ("camera_jerk_p99", self.camera_jerk_p99),
            (
                "cursor_camera_alignment_error_p95",
                self.cursor_camera_alignment_error_p95,
            ),
            (
                "text_readability_retention_score",
                self.text_readability_retention_score,
            ),
        ]
    }

    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        self.as_pairs()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// The aggregate result of evaluating one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEvaluation {
    pub scenario_id: String,
    pub status: EvaluationStatus,
    pub metrics: MetricSet,
    pub gate_results: BTreeMap<String, GateResult>,
    pub verdict: Verdict,
    pub notes: Vec<String>,
}

impl ScenarioEvaluation {
    /// A skipped scenario: no metrics computed, a single explanatory note.
    pub fn skipped(scenario_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            status: EvaluationStatus::Skipped,
            metrics: MetricSet::default(),
            gate_results: BTreeMap::new(),
            verdict: Verdict::Undetermined,
            notes: vec![reason.into()],
        }
    }
}

/// Formats a metric value with precision tiered by magnitude, matching the
/// reference report's console and Markdown rendering: `|v| >= 100` gets 2
/// decimal places, `|v| >= 10` gets 3, everything else gets 4. `None`
/// renders as `"n/a"`.
pub fn format_metric_value(value: Option<f64>) -> String {
    match value {
        None => "n/a".to_string(),
        Some(v) if v.abs() >= 100.0 => format!("{v:.2}"),
        Some(v) if v.abs() >= 10.0 => format!("{v:.3}"),
        Some(v) => format!("{v:.4}"),
    }
}
