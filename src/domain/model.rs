use crate::utils::error::{IngestError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

pub const ORIGINAL_MATRIX_KEY: &str = "originalMatrix";
pub const TRANSFORMED_MATRIX_KEY: &str = "transformedMatrix";
pub const TIMESTAMP_KEY: &str = "timestamp";

/// A 2D grid of table cells. Rows may differ in length and cells may hold
/// any JSON value; nothing here checks for numbers or a rectangular shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Value>>,
}

impl Grid {
    /// Builds a grid from the JSON value stored under `field`. A row that is
    /// not itself an array is treated as a single-cell row.
    pub fn from_value(field: &str, value: &Value) -> Result<Self> {
        let rows = value.as_array().ok_or_else(|| IngestError::InvalidGrid {
            field: field.to_string(),
            reason: format!("expected an array of rows, got {}", json_kind(value)),
        })?;

        let rows = rows
            .iter()
            .map(|row| match row {
                Value::Array(cells) => cells.clone(),
                other => vec![other.clone()],
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixPairRequest {
    pub original: Grid,
    pub transformed: Grid,
}

impl MatrixPairRequest {
    /// Both keys are checked before either grid is inspected.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = payload.as_object().ok_or(IngestError::MissingMatrixKeys)?;

        match (
            object.get(ORIGINAL_MATRIX_KEY),
            object.get(TRANSFORMED_MATRIX_KEY),
        ) {
            (Some(original), Some(transformed)) => Ok(Self {
                original: Grid::from_value(ORIGINAL_MATRIX_KEY, original)?,
                transformed: Grid::from_value(TRANSFORMED_MATRIX_KEY, transformed)?,
            }),
            _ => Err(IngestError::MissingMatrixKeys),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimestampRequest {
    pub timestamp: Value,
}

impl TimestampRequest {
    pub fn from_payload(payload: &Value) -> Result<Self> {
        payload
            .as_object()
            .and_then(|object| object.get(TIMESTAMP_KEY))
            .map(|timestamp| Self {
                timestamp: timestamp.clone(),
            })
            .ok_or(IngestError::MissingTimestampKey)
    }

    /// The text written to the timestamp log. Strings are written without
    /// quotes; anything else as compact JSON.
    pub fn as_log_line(&self) -> String {
        match &self.timestamp {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Outcome of a handled request, independent of any HTTP library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestResponse {
    pub status: u16,
    pub body: Value,
}

impl IngestResponse {
    pub fn message(status: u16, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(message.to_string()));
        Self {
            status,
            body: Value::Object(body),
        }
    }

    pub fn error(status: u16, error: &str) -> Self {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(error.to_string()));
        Self {
            status,
            body: Value::Object(body),
        }
    }

    pub fn from_error(err: &IngestError) -> Self {
        Self::error(err.status_code(), &err.public_message())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
