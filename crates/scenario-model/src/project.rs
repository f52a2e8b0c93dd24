//! Scenario project description: the declarative document describing a
//! single recording's camera timeline, frame-analysis cache, and the
//! relative paths of its companion recording artifacts.

use crate::timeline::Timeline;
use qa_common::QaError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One entry of the optional frame-analysis cache, produced by an upstream
/// scene-change detector and consumed by the readability-retention metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysisEntry {
    pub time: f64,
    pub is_scrolling: bool,
    pub change_amount: f64,
    pub similarity: f64,
}

/// Paths to a scenario package's companion recording artifacts, relative to
/// the package root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteropConfig {
    #[serde(default = "default_recording_metadata_path")]
    pub recording_metadata_path: PathBuf,
    #[serde(default)]
    pub streams: InteropStreams,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            recording_metadata_path: default_recording_metadata_path(),
            streams: InteropStreams::default(),
        }
    }
}

/// Input event stream paths nested under [`InteropConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteropStreams {
    #[serde(default = "default_mouse_moves_path")]
    pub mouse_moves: PathBuf,
}

impl Default for InteropStreams {
    fn default() -> Self {
        Self {
            mouse_moves: default_mouse_moves_path(),
        }
    }
}

fn default_recording_metadata_path() -> PathBuf {
    PathBuf::from("recording/metadata.json")
}

fn default_mouse_moves_path() -> PathBuf {
    PathBuf::from("recording/mousemoves-0.json")
}

/// Media container info, used only as a fallback source for timeline
/// duration when the timeline itself does not specify one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub duration: f64,
}

/// A declarative scenario project: the camera timeline that was synthesized,
/// an optional frame-analysis cache, and pointers to the raw input streams
/// used to produce it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescription {
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub media: Option<MediaInfo>,
    #[serde(default)]
    pub frame_analysis_cache: Option<Vec<FrameAnalysisEntry>>,
    #[serde(default)]
    pub interop: InteropConfig,
}

impl ProjectDescription {
    /// Loads a project description from its JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, QaError> {
        let content = std::fs::read_to_string(path).map_err(|e| QaError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| QaError::parse(path, e))
    }

    /// Effective timeline duration: `timeline.duration`, falling back to
    /// `media.duration` when the timeline itself does not specify one.
    pub fn effective_duration(&self) -> Option<f64> {
        self.timeline.duration.or_else(|| self.media.map(|m| m.duration))
    }

    /// Resolves a manifest entry's `projectPath` into the scenario package's
    /// directory: absolute paths pass through unchanged; relative paths are
    /// tried first against `repo_root`, falling back to the directory
    /// containing `manifest_path` if not found there. The scenario's own
    /// interop paths (recording metadata, mouse-move stream) are resolved
    /// directly against that directory instead, not through this function.
    pub fn resolve_path(candidate: &Path, repo_root: &Path, manifest_path: &Path) -> PathBuf {
        if candidate.is_absolute() {
            return candidate.to_path_buf();
        }
        let under_repo_root = repo_root.join(candidate);
        if under_repo_root.exists() {
            return under_repo_root;
        }
        manifest_path
            .parent()
            .map(|dir| dir.join(candidate))
            .unwrap_or_else(|| candidate.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_candidate_passes_through() {
        let resolved = ProjectDescription::resolve_path(
            Path::new("/abs/path.json"),
            Path::new("/repo"),
            Path::new("/repo/manifest.json"),
        );
        assert_eq!(resolved, PathBuf::from("/abs/path.json"));
    }

    #[test]
    fn relative_candidate_falls_back_to_manifest_dir() {
        let resolved = ProjectDescription::resolve_path(
            Path::new("scenario-a/project.json"),
            Path::new("/nonexistent-repo-root"),
            Path::new("/repo/manifests/corpus.json"),
        );
        assert_eq!(
            resolved,
            PathBuf::from("/repo/manifests/scenario-a/project.json")
        );
    }

    #[test]
    fn default_project_has_empty_timeline_and_default_interop_paths() {
        let project = ProjectDescription::default();
        assert!(project.timeline.tracks.is_empty());
        assert_eq!(
            project.interop.recording_metadata_path,
            PathBuf::from("recording/metadata.json")
        );
        assert_eq!(
            project.interop.streams.mouse_moves,
            PathBuf::from("recording/mousemoves-0.json")
        );
    }
}
