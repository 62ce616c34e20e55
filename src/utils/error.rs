use crate::core::codec::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeuzeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Token encoding failed: {0}")]
    EncodeError(#[from] EncodeError),

    #[error("Token decoding failed: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Step '{step}' is incomplete: '{field}' is required to continue")]
    StepIncompleteError { step: String, field: String },
}

pub type Result<T> = std::result::Result<T, KeuzeError>;
