use thiserror::Error;

pub const MISSING_MATRIX_KEYS_MESSAGE: &str =
    "Invalid data format. Expected 'originalMatrix' and 'transformedMatrix' keys.";
pub const MISSING_TIMESTAMP_KEY_MESSAGE: &str = "Invalid data format. Expected 'timestamp' key.";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{}", MISSING_MATRIX_KEYS_MESSAGE)]
    MissingMatrixKeys,

    #[error("{}", MISSING_TIMESTAMP_KEY_MESSAGE)]
    MissingTimestampKey,

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("Invalid grid in '{field}': {reason}")]
    InvalidGrid { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl IngestError {
    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            IngestError::MissingMatrixKeys
            | IngestError::MissingTimestampKey
            | IngestError::MalformedBody { .. } => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Message placed in the `error` field of a JSON response. Server faults
    /// are not echoed back to the caller.
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            "Internal server error".to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
