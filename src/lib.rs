pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{file_sink::FileSink, memory_sink::MemorySink};
pub use config::IngestConfig;
pub use crate::core::{router::Router, service::IngestService};
pub use utils::error::{IngestError, Result};
