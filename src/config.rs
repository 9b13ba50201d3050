//! Configuration loading and management
//!
//! Handles parsing of `.stagetime.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default event log to analyze when no path is given on the CLI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<PathBuf>,

    /// Report formatting
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: None,
            report: ReportConfig::default(),
        }
    }
}

/// Report formatting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// strftime format for the calendar-time columns
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_time_format() -> String {
    "%Y-%m-%d %H:%M:%S%.3f".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            time_format: default_time_format(),
        }
    }
}

impl Config {
    /// Load configuration from a `.stagetime.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".stagetime.toml");
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validate_time_format(&self.report.time_format, "report.time_format")?;
        Ok(())
    }
}

fn validate_time_format(format: &str, field: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(Error::InvalidConfig(format!(
            "{field}: format cannot be empty"
        )));
    }

    use chrono::format::{Item, StrftimeItems};
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidConfig(format!(
            "{field}: invalid strftime format '{format}'"
        )));
    }

    Ok(())
}
