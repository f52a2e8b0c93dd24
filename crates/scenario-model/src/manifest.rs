//! Scenario manifest: the corpus of scenario packages a report run iterates
//! over.

use qa_common::QaError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Readiness of a scenario entry. Only `Ready` scenarios are evaluated by the
/// core; other statuses yield a skipped result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Ready,
    Draft,
    Archived,
}

/// A single scenario entry in the corpus manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioEntry {
    pub id: String,
    pub status: ScenarioStatus,
    pub project_path: PathBuf,
}

/// The full scenario corpus manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioManifest {
    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
}

impl ScenarioManifest {
    pub fn load(path: &Path) -> Result<Self, QaError> {
        let content = std::fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| QaError::parse(path, e))
    }
}
