use crate::config::IngestConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ingest-log")]
#[command(about = "Receives matrix pairs and timestamps over HTTP and appends them to log files")]
pub struct CliArgs {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on (default 127.0.0.1:8765)")]
    pub listen_addr: Option<String>,

    #[arg(long, help = "File receiving rendered matrix tables")]
    pub matrix_log: Option<PathBuf>,

    #[arg(long, help = "File receiving one timestamp per line")]
    pub timestamp_log: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit diagnostics as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    /// Defaults, then the TOML file if given, then flags.
    pub fn resolve(&self) -> Result<IngestConfig> {
        let mut config = match &self.config {
            Some(path) => IngestConfig::from_file(path)?,
            None => IngestConfig::default(),
        };

        if let Some(addr) = &self.listen_addr {
            config.server.listen_addr = addr.clone();
        }
        if let Some(path) = &self.matrix_log {
            config.logs.matrix_log = path.clone();
        }
        if let Some(path) = &self.timestamp_log {
            config.logs.timestamp_log = path.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        Ok(config)
    }
}
