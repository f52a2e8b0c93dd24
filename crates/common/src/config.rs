//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration for the report driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default report generation settings.
    pub report: ReportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default parameters for a report run, used when the CLI flag is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefaults {
    /// Camera sampling rate in Hz.
    pub sample_rate_hz: f64,

    /// Default scenario manifest filename, relative to the repo root.
    pub manifest_path: PathBuf,

    /// Default gate configuration filename, relative to the repo root.
    pub gates_path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "qa_report_cli=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report: ReportDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            sample_rate_hz: 60.0,
            manifest_path: PathBuf::from("private-docs/benchmarks/smart-generation/scenario-corpus.json"),
            gates_path: PathBuf::from("private-docs/benchmarks/smart-generation/quality-gates.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("qa-report").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_settings_use_sixty_hertz_sampling() {
        let config = AppConfig::default();
        assert_eq!(config.report.sample_rate_hz, 60.0);
        assert_eq!(config.logging.level, "info");
    }
}
