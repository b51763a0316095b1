//! Shared error types for the workshop backend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid identifier: {input}")]
    InvalidId { input: String },

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
