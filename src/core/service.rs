use crate::core::render::render_grid;
use crate::domain::model::{MatrixPairRequest, TimestampRequest};
use crate::domain::ports::LogSink;
use crate::utils::error::Result;

pub const MATRIX_SUCCESS_MESSAGE: &str = "Matrices received and logged successfully";
pub const TIMESTAMP_SUCCESS_MESSAGE: &str = "Timestamp received and logged successfully";

const ORIGINAL_LABEL: &str = "Original Matrix:";
const TRANSFORMED_LABEL: &str = "Transformed Matrix:";

/// Writer for the general log: every block is followed by a blank line.
pub struct BlockLog<S: LogSink> {
    sink: S,
}

impl<S: LogSink> BlockLog<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn write_blocks(&self, blocks: &[String]) -> Result<()> {
        let entries: Vec<String> = blocks
            .iter()
            .flat_map(|block| [block.clone(), String::new()])
            .collect();
        self.sink.append(&entries)
    }
}

/// Writer for the timestamp log: one value per line.
pub struct LineLog<S: LogSink> {
    sink: S,
}

impl<S: LogSink> LineLog<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn write_line(&self, line: &str) -> Result<()> {
        self.sink.append_line(line)
    }
}

pub struct IngestService<G: LogSink, T: LogSink> {
    matrix_log: BlockLog<G>,
    timestamp_log: LineLog<T>,
}

impl<G: LogSink, T: LogSink> IngestService<G, T> {
    pub fn new(matrix_sink: G, timestamp_sink: T) -> Self {
        Self {
            matrix_log: BlockLog::new(matrix_sink),
            timestamp_log: LineLog::new(timestamp_sink),
        }
    }

    /// Both grids are rendered before anything is written.
    pub fn submit_matrix_pair(&self, request: &MatrixPairRequest) -> Result<&'static str> {
        let original = render_grid(&request.original);
        let transformed = render_grid(&request.transformed);

        self.matrix_log.write_blocks(&[
            ORIGINAL_LABEL.to_string(),
            original,
            TRANSFORMED_LABEL.to_string(),
            transformed,
        ])?;

        tracing::debug!(
            original_rows = request.original.row_count(),
            transformed_rows = request.transformed.row_count(),
            "Matrix pair logged"
        );
        Ok(MATRIX_SUCCESS_MESSAGE)
    }

    pub fn submit_timestamp(&self, request: &TimestampRequest) -> Result<&'static str> {
        let line = request.as_log_line();
        self.timestamp_log.write_line(&line)?;

        tracing::info!("Received timestamp: {}", line);
        Ok(TIMESTAMP_SUCCESS_MESSAGE)
    }
}
