//! Gate Evaluator — compares computed metrics against configured
//! operator/threshold pairs and rolls them up into an overall verdict.

use qa_common::QaError;
use qa_scenario_model::{GateConfig, GateResult, MetricSet, Verdict};
use std::collections::BTreeMap;

/// Evaluates every metric named in `gate_config.metric_gates` against
/// `metrics`, returning per-metric results and the overall verdict. Metric
/// keys not among the six headline metrics are silently ignored — they
/// produce no result entry. An unsupported operator would be a fatal
/// configuration error, but [`GateConfig`] only deserializes the four
/// supported operators, so that case cannot arise here.
pub fn evaluate_gates(
    metrics: &MetricSet,
    gate_config: &GateConfig,
) -> Result<(BTreeMap<String, GateResult>, Verdict), QaError> {
    let mut results = BTreeMap::new();

    for (name, gate) in &gate_config.metric_gates {
        let Some(value) = metrics.get(name) else {
            continue;
        };
        let result = match value {
            None => GateResult::InsufficientData,
            Some(v) if gate.operator.compare(v, gate.threshold) => GateResult::Pass,
            Some(_) => GateResult::Fail,
        };
        results.insert(name.clone(), result);
    }

    let evaluated: Vec<&GateResult> = results
        .values()
        .filter(|r| !matches!(r, GateResult::InsufficientData))
        .collect();

    let verdict = if evaluated.is_empty() {
        Verdict::Undetermined
    } else if evaluated.iter().all(|r| matches!(r, GateResult::Pass)) {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    Ok((results, verdict))
}
