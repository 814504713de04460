pub mod render;
pub mod router;
pub mod service;

pub use crate::domain::model::{Grid, IngestResponse, MatrixPairRequest, TimestampRequest};
pub use crate::domain::ports::LogSink;
pub use crate::utils::error::Result;
