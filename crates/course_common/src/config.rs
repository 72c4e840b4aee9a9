//! CourseApp Configuration
//!
//! Config file: --config <path>, $COURSECTL_CONFIG, or ./coursectl.toml.
//! Every field has a default, so an absent file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error_logger::ERROR_LOG_FILE;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "COURSECTL_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "coursectl.toml";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Error log settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Path of the append-only error log
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
}

fn default_error_log() -> PathBuf {
    PathBuf::from(ERROR_LOG_FILE)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            error_log: default_error_log(),
        }
    }
}

/// Error log analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory that logged file names are resolved against
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Lines of source shown around a logged line
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_context_lines() -> usize {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            context_lines: default_context_lines(),
        }
    }
}

/// Main CourseApp configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl CourseConfig {
    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. $COURSECTL_CONFIG (must exist)
    /// 3. ./coursectl.toml (if present)
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
