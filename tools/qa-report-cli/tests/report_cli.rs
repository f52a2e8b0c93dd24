//! End-to-end tests of the `qa-report report` subcommand: builds a scenario
//! corpus on disk (manifest, gate config, and scenario packages) and drives
//! the compiled binary as a black box rather than reaching into its
//! internals.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("qa-report-cli-test-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.join(rel)
    }

    fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

const SINGLE_LINEAR_PAN_PROJECT: &str = r#"{
    "timeline": {
        "duration": 3.0,
        "tracks": [
            {
                "type": "transform",
                "data": {
                    "segments": [
                        {
                            "startTime": 0.0,
                            "endTime": 1.0,
                            "startTransform": {"center": {"x": 0.5, "y": 0.5}, "zoom": 1.0},
                            "endTransform": {"center": {"x": 0.5, "y": 0.5}, "zoom": 1.0},
                            "easing": {"type": "linear"}
                        },
                        {
                            "startTime": 1.0,
                            "endTime": 2.0,
                            "startTransform": {"center": {"x": 0.5, "y": 0.5}, "zoom": 1.0},
                            "endTransform": {"center": {"x": 0.7, "y": 0.5}, "zoom": 1.0},
                            "easing": {"type": "linear"}
                        },
                        {
                            "startTime": 2.0,
                            "endTime": 3.0,
                            "startTransform": {"center": {"x": 0.7, "y": 0.5}, "zoom": 1.0},
                            "endTransform": {"center": {"x": 0.7, "y": 0.5}, "zoom": 1.0},
                            "easing": {"type": "linear"}
                        }
                    ]
                }
            }
        ]
    }
}"#;

fn non_blocking_gates() -> &'static str {
    r#"{"mode":"non_blocking","passRateTarget":0.9,"metricGates":{}}"#
}

fn run_report(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_qa-report"))
        .args(args)
        .output()
        .expect("qa-report binary runs")
}

#[test]
fn reports_a_single_linear_pan_scenario_with_no_cursor_stream() {
    let ws = Workspace::new("single-pan");
    let scenario_dir = ws.path("scenario-a");
    ws.write("scenario-a/project.json", SINGLE_LINEAR_PAN_PROJECT);
    let manifest = ws.write(
        "manifest.json",
        &format!(
            r#"{{"scenarios":[{{"id":"scenario-a","status":"ready","projectPath":"{}"}}]}}"#,
            scenario_dir.display().to_string().replace('\\', "\\\\")
        ),
    );
    let gates = ws.write("gates.json", non_blocking_gates());
    let output_json = ws.path("report.json");

    let output = run_report(&[
        "report",
        "--manifest",
        manifest.to_str().unwrap(),
        "--gates",
        gates.to_str().unwrap(),
        "--output-json",
        output_json.to_str().unwrap(),
    ]);

    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_json).unwrap()).unwrap();
    assert_eq!(report["summary"]["total"], 1);
    assert_eq!(report["summary"]["evaluated"], 1);
    assert_eq!(report["scenarios"][0]["scenarioId"], "scenario-a");
    assert_eq!(report["scenarios"][0]["status"], "evaluated");
    assert!(report["scenarios"][0]["metrics"]["cursorCameraAlignmentErrorP95"].is_null());
}

#[test]
fn a_scenario_missing_its_project_json_is_skipped_not_fatal() {
    let ws = Workspace::new("missing-project");
    let manifest = ws.write(
        "manifest.json",
        &format!(
            r#"{{"scenarios":[{{"id":"scenario-missing","status":"ready","projectPath":"{}"}}]}}"#,
            ws.path("nowhere").display().to_string().replace('\\', "\\\\")
        ),
    );
    let gates = ws.write("gates.json", non_blocking_gates());
    let output_json = ws.path("report.json");

    let output = run_report(&[
        "report",
        "--manifest",
        manifest.to_str().unwrap(),
        "--gates",
        gates.to_str().unwrap(),
        "--output-json",
        output_json.to_str().unwrap(),
    ]);

    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_json).unwrap()).unwrap();
    assert_eq!(report["summary"]["evaluated"], 0);
    assert_eq!(report["summary"]["skipped"], 1);
    assert_eq!(report["scenarios"][0]["status"], "skipped");
}

#[test]
fn enforce_gates_exits_nonzero_when_a_scenario_fails() {
    let ws = Workspace::new("enforce-gates");
    let scenario_dir = ws.path("scenario-a");
    ws.write("scenario-a/project.json", SINGLE_LINEAR_PAN_PROJECT);
    let manifest = ws.write(
        "manifest.json",
        &format!(
            r#"{{"scenarios":[{{"id":"scenario-a","status":"ready","projectPath":"{}"}}]}}"#,
            scenario_dir.display().to_string().replace('\\', "\\\\")
        ),
    );
    // an unattainable jerk ceiling forces a failing verdict deterministically.
    let gates = ws.write(
        "gates.json",
        r#"{"mode":"blocking","passRateTarget":1.0,"metricGates":{"camera_jerk_p95":{"operator":"<=","threshold":-1.0}}}"#,
    );

    let output = run_report(&[
        "report",
        "--manifest",
        manifest.to_str().unwrap(),
        "--gates",
        gates.to_str().unwrap(),
        "--enforce-gates",
    ]);

    assert_eq!(output.status.code(), Some(2));
}
