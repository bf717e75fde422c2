//! Error types for request validation and request import.

use thiserror::Error;

/// Why a request could not be dispatched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Headers must be valid JSON: {0}")]
    InvalidHeadersJson(String),

    #[error("Body must be valid JSON: {0}")]
    InvalidBodyJson(String),
}

/// Why an exported request document could not be imported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The document as a whole is not JSON
    #[error("Invalid JSON format in file: {0}")]
    InvalidJson(String),

    #[error("Invalid request file: top level must be a JSON object")]
    NotAnObject,

    #[error("Invalid request file: unsupported method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid request file: field '{0}' must be a string")]
    FieldType(&'static str),
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::InvalidJson(err.to_string())
    }
}
