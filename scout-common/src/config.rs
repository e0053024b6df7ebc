//! Configuration management for the Scout toolchain.
//!
//! All Scout tools share a configuration file at `~/.scout/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (SCOUT_* prefix)
//! 2. Config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `SCOUT_LOG_LEVEL` → observability.log_level
//! - `SCOUT_LOG_FORMAT` → observability.log_format
//! - `SCOUT_OUTPUT_DIR` → report.output_dir

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".scout"),
        |dirs| dirs.home_dir().join(".scout"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration shared by all Scout tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" for structured JSON, "pretty" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Report Configuration
// ============================================================================

/// Report generation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory report artifacts are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Formats rendered when the caller does not ask for specific ones
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Keyword cap for the auto-derived keyword table
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            top_keywords: default_top_keywords(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_formats() -> Vec<String> {
    vec!["markdown".into(), "html".into()]
}

fn default_top_keywords() -> usize {
    30
}

/// Report formats accepted in `report.formats`.
const KNOWN_FORMATS: &[&str] = &["markdown", "md", "html", "json"];

// ============================================================================
// Unified Configuration
// ============================================================================

/// Unified configuration for Scout tools.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Report generation defaults
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no config file exists. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply SCOUT_* environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("SCOUT_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("SCOUT_LOG_FORMAT") {
            self.observability.log_format = format;
        }
        if let Ok(dir) = std::env::var("SCOUT_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(Error::Config(format!(
                "Invalid observability.log_level '{}': expected one of {:?}",
                self.observability.log_level, LEVELS
            )));
        }

        const FORMATS: &[&str] = &["json", "pretty"];
        if !FORMATS.contains(&self.observability.log_format.as_str()) {
            return Err(Error::Config(format!(
                "Invalid observability.log_format '{}': expected one of {:?}",
                self.observability.log_format, FORMATS
            )));
        }

        if self.report.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("report.output_dir must not be empty".into()));
        }

        if self.report.top_keywords == 0 {
            return Err(Error::Config(
                "report.top_keywords must be at least 1".into(),
            ));
        }

        for format in &self.report.formats {
            if !KNOWN_FORMATS.contains(&format.to_lowercase().as_str()) {
                return Err(Error::Config(format!(
                    "Unknown report format '{format}': expected one of {KNOWN_FORMATS:?}"
                )));
            }
        }

        Ok(())
    }
}
