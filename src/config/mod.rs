#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logs: LogsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Paths of the two log targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsSection {
    #[serde(default = "default_matrix_log")]
    pub matrix_log: PathBuf,
    #[serde(default = "default_timestamp_log")]
    pub timestamp_log: PathBuf,
}

/// Diagnostic logging (tracing), not the log targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8765".to_string()
}

fn default_matrix_log() -> PathBuf {
    PathBuf::from("matrices_log_ui.txt")
}

fn default_timestamp_log() -> PathBuf {
    PathBuf::from("timestamp_log_ui.txt")
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for LogsSection {
    fn default() -> Self {
        Self {
            matrix_log: default_matrix_log(),
            timestamp_log: default_timestamp_log(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: None,
            format: default_log_format(),
        }
    }
}

impl IngestConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.listen_addr", &self.server.listen_addr)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for IngestConfig {
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        validation::validate_path("logs.matrix_log", &self.logs.matrix_log)?;
        validation::validate_path("logs.timestamp_log", &self.logs.timestamp_log)?;

        if self.logs.matrix_log == self.logs.timestamp_log {
            return Err(IngestError::ConfigValidationError {
                field: "logs".to_string(),
                message: "matrix_log and timestamp_log must be different files".to_string(),
            });
        }

        if let Some(level) = &self.logging.level {
            validation::validate_non_empty_string("logging.level", level)?;
        }
        validation::validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;

        Ok(())
    }
}
