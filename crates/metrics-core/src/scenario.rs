//! Ties the trajectory, dynamics, episode, metric, and gate stages together
//! into a single per-scenario evaluation.

use crate::dynamics::compute_dynamics;
use crate::episodes::detect_movement_episodes;
use crate::gates::evaluate_gates;
use crate::metrics::compute_metrics;
use crate::trajectory::build_trajectory;
use qa_scenario_model::{
    load_mouse_moves, normalize_mouse_moves, EvaluationStatus, GateConfig, ProjectDescription,
    RecordingMetadata, ScenarioEvaluation,
};
use std::path::Path;

/// Evaluates one `status == "ready"` scenario: builds its trajectory, derives
/// dynamics and episodes, loads its optional cursor stream, computes the six
/// headline metrics, and evaluates them against `gate_config`.
///
/// `project_path` is the scenario package's own root directory; the
/// project's `interop.recordingMetadataPath`/`interop.streams.mouseMoves`
/// are resolved relative to it, not to `repo_root` or `manifest_path`.
pub fn evaluate_scenario(
    scenario_id: &str,
    project: &ProjectDescription,
    project_path: &Path,
    sample_rate_hz: f64,
    gate_config: &GateConfig,
) -> ScenarioEvaluation {
    let span = tracing::info_span!("evaluate_scenario", scenario_id);
    let _enter = span.enter();

    let mut notes = Vec::new();

    let trajectory = build_trajectory(project, sample_rate_hz);
    tracing::debug!(source = ?trajectory.source, samples = trajectory.samples.len(), "trajectory built");
    notes.extend(trajectory.notes.clone());

    let dynamics = compute_dynamics(&trajectory.samples);
    notes.push(format!(
        "{} camera samples, {} dynamics samples",
        trajectory.samples.len(),
        dynamics.len()
    ));

    let episodes = detect_movement_episodes(&trajectory.samples, &dynamics, sample_rate_hz);
    tracing::debug!(episodes = episodes.len(), "movement episodes detected");
    if episodes.is_empty() {
        notes.push("No movement episodes detected".to_string());
    } else {
        notes.push(format!("{} movement episodes detected", episodes.len()));
    }

    let cursor = load_cursor_samples(project, project_path, &mut notes);

    let duration = project.effective_duration().unwrap_or(0.0);
    let metrics_result = compute_metrics(
        &trajectory.samples,
        &dynamics,
        &episodes,
        cursor.as_deref(),
        project.frame_analysis_cache.as_deref(),
        duration,
    );
    notes.extend(metrics_result.notes);

    let (gate_results, verdict) = match evaluate_gates(&metrics_result.metrics, gate_config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "gate configuration error");
            notes.push(format!("Gate configuration error: {e}"));
            (Default::default(), qa_scenario_model::Verdict::Fail)
        }
    };

    ScenarioEvaluation {
        scenario_id: scenario_id.to_string(),
        status: EvaluationStatus::Evaluated,
        metrics: metrics_result.metrics,
        gate_results,
        verdict,
        notes,
    }
}

fn load_cursor_samples(
    project: &ProjectDescription,
    project_path: &Path,
    notes: &mut Vec<String>,
) -> Option<Vec<qa_scenario_model::CursorSample>> {
    let metadata_path = project_path.join(&project.interop.recording_metadata_path);
    let mouse_moves_path = project_path.join(&project.interop.streams.mouse_moves);

    let metadata = RecordingMetadata::load(&metadata_path).ok()?;
    let moves = load_mouse_moves(&mouse_moves_path).ok()?;

    match normalize_mouse_moves(&moves, &metadata) {
        Some(samples) => {
            notes.push(format!("Loaded {} cursor samples", samples.len()));
            Some(samples)
        }
        None => {
            notes.push("Invalid metadata display size; cursor alignment metric skipped".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_scenario_model::{GateMode, Timeline, Track, TrackData};
    use std::collections::BTreeMap;

    fn gate_config() -> GateConfig {
        GateConfig {
            mode: GateMode::NonBlocking,
            pass_rate_target: 0.9,
            metric_gates: BTreeMap::new(),
        }
    }

    #[test]
    fn empty_timeline_yields_undetermined_verdict_with_duration_note() {
        let project = ProjectDescription {
            timeline: Timeline::default(),
            ..Default::default()
        };
        let evaluation = evaluate_scenario(
            "scenario-a",
            &project,
            Path::new("/nonexistent"),
            60.0,
            &gate_config(),
        );
        assert_eq!(evaluation.status, EvaluationStatus::Evaluated);
        assert_eq!(evaluation.verdict, qa_scenario_model::Verdict::Undetermined);
        assert!(evaluation
            .notes
            .iter()
            .any(|n| n == "Timeline duration is missing or zero"));
    }

    #[test]
    fn missing_cursor_files_are_noted_and_do_not_fail_the_scenario() {
        let mut project = ProjectDescription::default();
        project.timeline.duration = Some(1.0);
        project.timeline.tracks = vec![Track {
            track_type: "transform".to_string(),
            data: TrackData {
                segments: vec![qa_scenario_model::Segment {
                    start_time: 0.0,
                    end_time: 1.0,
                    start_transform: Default::default(),
                    end_transform: Default::default(),
                    easing: qa_scenario_model::Easing::Linear,
                }],
            },
        }];
        let evaluation = evaluate_scenario(
            "scenario-b",
            &project,
            Path::new("/nonexistent"),
            60.0,
            &gate_config(),
        );
        assert_eq!(evaluation.metrics.cursor_camera_alignment_error_p95, None);
        assert!(evaluation
            .notes
            .iter()
            .any(|n| n.contains("Cursor streams not found")));
    }

    #[test]
    fn cursor_streams_are_resolved_against_the_scenario_package_root() {
        let tmp = std::env::temp_dir().join(format!(
            "qa-scenario-test-{}",
            std::process::id()
        ));
        let recording_dir = tmp.join("recording");
        std::fs::create_dir_all(&recording_dir).unwrap();
        std::fs::write(
            recording_dir.join("metadata.json"),
            r#"{"display":{"widthPx":1000.0,"heightPx":500.0},"processTimeStartMs":0}"#,
        )
        .unwrap();
        std::fs::write(
            recording_dir.join("mousemoves-0.json"),
            r#"[{"processTimeMs":0,"x":500.0,"y":250.0}]"#,
        )
        .unwrap();

        let mut project = ProjectDescription::default();
        project.timeline.duration = Some(1.0);
        project.timeline.tracks = vec![Track {
            track_type: "transform".to_string(),
            data: TrackData {
                segments: vec![qa_scenario_model::Segment {
                    start_time: 0.0,
                    end_time: 1.0,
                    start_transform: Default::default(),
                    end_transform: Default::default(),
                    easing: qa_scenario_model::Easing::Linear,
                }],
            },
        }];

        let evaluation = evaluate_scenario("scenario-c", &project, &tmp, 60.0, &gate_config());
        assert!(evaluation
            .notes
            .iter()
            .any(|n| n == "Loaded 1 cursor samples"));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn invalid_display_size_is_noted_distinctly_from_a_missing_stream() {
        let tmp = std::env::temp_dir().join(format!(
            "qa-scenario-test-badsize-{}",
            std::process::id()
        ));
        let recording_dir = tmp.join("recording");
        std::fs::create_dir_all(&recording_dir).unwrap();
        std::fs::write(
            recording_dir.join("metadata.json"),
            r#"{"display":{"widthPx":0.0,"heightPx":500.0},"processTimeStartMs":0}"#,
        )
        .unwrap();
        std::fs::write(recording_dir.join("mousemoves-0.json"), "[]").unwrap();

        let mut project = ProjectDescription::default();
        project.timeline.duration = Some(1.0);

        let evaluation = evaluate_scenario("scenario-d", &project, &tmp, 60.0, &gate_config());
        assert!(evaluation
            .notes
            .iter()
            .any(|n| n == "Invalid metadata display size; cursor alignment metric skipped"));

        std::fs::remove_dir_all(&tmp).ok();
    }
}
