//! Gate configuration: thresholds a scenario's metrics are compared against.

use qa_common::QaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Whether a failing gate should fail the CI run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    Blocking,
    NonBlocking,
}

/// Comparison operator for a single metric gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOperator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
}

impl GateOperator {
    pub fn compare(&self, value: f64, threshold: f64) -> bool {
        match self {
            GateOperator::LessThan => value < threshold,
            GateOperator::LessThanOrEqual => value <= threshold,
            GateOperator::GreaterThan => value > threshold,
            GateOperator::GreaterThanOrEqual => value >= threshold,
        }
    }
}

/// A single metric's threshold configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricGate {
    pub operator: GateOperator,
    pub threshold: f64,
}

/// The full gate configuration for a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    pub mode: GateMode,
    pub pass_rate_target: f64,
    #[serde(default)]
    pub metric_gates: BTreeMap<String, MetricGate>,
}

impl GateConfig {
    pub fn load(path: &Path) -> Result<Self, QaError> {
        let content = std::fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| QaError::parse(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_compare_matches_each_variant() {
        assert!(GateOperator::LessThan.compare(1.0, 2.0));
        assert!(!GateOperator::LessThan.compare(2.0, 2.0));
        assert!(GateOperator::LessThanOrEqual.compare(2.0, 2.0));
        assert!(GateOperator::GreaterThan.compare(3.0, 2.0));
        assert!(GateOperator::GreaterThanOrEqual.compare(2.0, 2.0));
    }

    #[test]
    fn parses_gate_config_with_operator_symbols() {
        let json = r#"{
            "mode": "blocking",
            "passRateTarget": 0.95,
            "metricGates": {
                "camera_jerk_p95": {"operator": "<=", "threshold": 12.0}
            }
        }"#;
        let config: GateConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mode, GateMode::Blocking);
        assert_eq!(config.metric_gates.len(), 1);
    }
}
