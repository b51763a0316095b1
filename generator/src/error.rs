//! Text generation error types

use std::fmt;
use thiserror::Error;

use crate::types::ProviderId;

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Failure reasons for provider requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// Authentication failed (invalid API key)
    AuthenticationFailed,
    /// Rate limit exceeded
    RateLimitExceeded,
    /// Invalid request format or parameters
    InvalidRequest(String),
    /// Network/connection error
    NetworkError(String),
    /// Server error from provider
    ServerError(String),
    /// Request timeout
    Timeout,
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            ApiFailure::NetworkError(msg) => write!(f, "network error: {msg}"),
            ApiFailure::ServerError(msg) => write!(f, "server error: {msg}"),
            ApiFailure::Timeout => write!(f, "request timed out"),
            ApiFailure::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

impl ApiFailure {
    /// Map a non-success HTTP status to a failure reason
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => ApiFailure::AuthenticationFailed,
            429 => ApiFailure::RateLimitExceeded,
            400 | 404 | 422 => ApiFailure::InvalidRequest(status.to_string()),
            503 => ApiFailure::ServiceUnavailable,
            _ => ApiFailure::ServerError(status.to_string()),
        }
    }

    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiFailure::Timeout
        } else {
            ApiFailure::NetworkError(err.to_string())
        }
    }
}

/// Generator error types
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Upstream generation failed: {provider} - {reason}")]
    UpstreamGenerationFailure { provider: ProviderId, reason: ApiFailure },

    #[error("No text generation provider is configured")]
    NotConfigured,

    #[error("Generated output did not match {expected}: {message}")]
    MalformedOutput { expected: &'static str, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl GeneratorError {
    pub fn malformed(expected: &'static str, message: impl Into<String>) -> Self {
        GeneratorError::MalformedOutput {
            expected,
            message: message.into(),
        }
    }
}
