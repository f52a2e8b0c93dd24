//! `report` subcommand: runs a scenario corpus through the metric and gate
//! pipeline and renders console, Markdown, and JSON reports.

use anyhow::Context;
use qa_metrics_core::evaluate_scenario;
use qa_scenario_model::{
    format_metric_value, EvaluationStatus, GateConfig, GateResult, ProjectDescription,
    ScenarioEvaluation, ScenarioManifest, ScenarioStatus, Verdict,
};
use serde::Serialize;
use std::path::PathBuf;

pub struct ReportArgs {
    pub manifest: PathBuf,
    pub gates: PathBuf,
    pub sample_rate_hz: f64,
    pub scenario_filter: Vec<String>,
    pub output_json: Option<PathBuf>,
    pub output_md: Option<PathBuf>,
    pub enforce_gates: bool,
}

pub struct ReportOutcome {
    pub gate_enforced_failure: bool,
}

pub fn run(args: ReportArgs) -> anyhow::Result<ReportOutcome> {
    let manifest = ScenarioManifest::load(&args.manifest)
        .with_context(|| format!("loading scenario manifest {}", args.manifest.display()))?;
    let gate_config = GateConfig::load(&args.gates)
        .with_context(|| format!("loading gate configuration {}", args.gates.display()))?;

    let repo_root = std::env::current_dir().context("resolving repo root")?;

    let scenarios: Vec<_> = if args.scenario_filter.is_empty() {
        manifest.scenarios.iter().collect()
    } else {
        manifest
            .scenarios
            .iter()
            .filter(|s| args.scenario_filter.contains(&s.id))
            .collect()
    };

    let evaluations: Vec<ScenarioEvaluation> = scenarios
        .iter()
        .map(|entry| {
            evaluate_one(
                entry,
                &repo_root,
                &args.manifest,
                args.sample_rate_hz,
                &gate_config,
            )
        })
        .collect();

    print_console_summary(&evaluations);

    if let Some(path) = &args.output_json {
        let report = build_json_report(&evaluations, &args, &gate_config);
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing JSON report to {}", path.display()))?;
    }

    if let Some(path) = &args.output_md {
        std::fs::write(path, to_markdown_report(&evaluations))
            .with_context(|| format!("writing Markdown report to {}", path.display()))?;
    }

    let gate_enforced_failure = args.enforce_gates
        && evaluations
            .iter()
            .any(|e| e.status == EvaluationStatus::Evaluated && e.verdict == Verdict::Fail);

    Ok(ReportOutcome {
        gate_enforced_failure,
    })
}

fn evaluate_one(
    entry: &qa_scenario_model::ScenarioEntry,
    repo_root: &std::path::Path,
    manifest_path: &std::path::Path,
    sample_rate_hz: f64,
    gate_config: &GateConfig,
) -> ScenarioEvaluation {
    if entry.status != ScenarioStatus::Ready {
        return ScenarioEvaluation::skipped(&entry.id, "Scenario status is not ready");
    }

    let scenario_dir = ProjectDescription::resolve_path(&entry.project_path, repo_root, manifest_path);
    let project_json = scenario_dir.join("project.json");
    let project = match ProjectDescription::load(&project_json) {
        Ok(project) => project,
        Err(_) => {
            return ScenarioEvaluation::skipped(
                &entry.id,
                format!("Project description file absent: {}", project_json.display()),
            );
        }
    };

    evaluate_scenario(&entry.id, &project, &scenario_dir, sample_rate_hz, gate_config)
}

fn print_console_summary(evaluations: &[ScenarioEvaluation]) {
    for evaluation in evaluations {
        println!(
            "[{}] {:?} verdict={:?}",
            evaluation.scenario_id, evaluation.status, evaluation.verdict
        );
        for note in &evaluation.notes {
            println!("    - {note}");
        }
    }

    let evaluated = evaluations
        .iter()
        .filter(|e| e.status == EvaluationStatus::Evaluated)
        .count();
    let passed = evaluations
        .iter()
        .filter(|e| e.verdict == Verdict::Pass)
        .count();
    println!(
        "\n{} scenarios, {} evaluated, {} passed",
        evaluations.len(),
        evaluated,
        passed
    );
}

fn to_markdown_report(evaluations: &[ScenarioEvaluation]) -> String {
    let mut out = String::new();
    out.push_str("| Scenario | Status | Settling p95 (s) | Overshoot p95 | Jerk p95 | Jerk p99 | Cursor Align p95 | Readability | Gate |\n");
    out.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for evaluation in evaluations {
        out.push_str(&format!(
            "| {} | {:?} | {} | {} | {} | {} | {} | {} | {:?} |\n",
            evaluation.scenario_id,
            evaluation.status,
            format_metric_value(evaluation.metrics.transition_settling_time_p95_sec),
            format_metric_value(evaluation.metrics.overshoot_ratio_p95),
            format_metric_value(evaluation.metrics.camera_jerk_p95),
            format_metric_value(evaluation.metrics.camera_jerk_p99),
            format_metric_value(evaluation.metrics.cursor_camera_alignment_error_p95),
            format_metric_value(evaluation.metrics.text_readability_retention_score),
            evaluation.verdict,
        ));
    }
    out
}

#[derive(Serialize)]
struct JsonSummary {
    generated_at: String,
    total: usize,
    evaluated: usize,
    skipped: usize,
    gate_checked: usize,
    gate_passed: usize,
    pass_rate: f64,
    manifest_path: String,
    gate_mode: qa_scenario_model::GateMode,
    pass_rate_target: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    scenarios: &'a [ScenarioEvaluation],
}

fn build_json_report<'a>(
    evaluations: &'a [ScenarioEvaluation],
    args: &ReportArgs,
    gate_config: &GateConfig,
) -> JsonReport<'a> {
    let total = evaluations.len();
    let evaluated = evaluations
        .iter()
        .filter(|e| e.status == EvaluationStatus::Evaluated)
        .count();
    let skipped = total - evaluated;
    let gate_checked = evaluations
        .iter()
        .filter(|e| e.gate_results.values().any(|r| *r != GateResult::InsufficientData))
        .count();
    let gate_passed = evaluations
        .iter()
        .filter(|e| e.verdict == Verdict::Pass)
        .count();
    let pass_rate = if gate_checked > 0 {
        gate_passed as f64 / gate_checked as f64
    } else {
        0.0
    };

    JsonReport {
        summary: JsonSummary {
            generated_at: chrono::Utc::now().to_rfc3339(),
            total,
            evaluated,
            skipped,
            gate_checked,
            gate_passed,
            pass_rate,
            manifest_path: args.manifest.display().to_string(),
            gate_mode: gate_config.mode,
            pass_rate_target: gate_config.pass_rate_target,
        },
        scenarios: evaluations,
    }
}
