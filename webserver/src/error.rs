//! WebServer-specific error types

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use serde_json::json;
use shared::SharedError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Invalid identifier for {field}: {input}")]
    InvalidId { field: &'static str, input: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config(message.into())
    }

    /// HTTP status and stable error kind for the response body
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            WebServerError::Orchestrator(err) => {
                let status = match err {
                    OrchestratorError::NotFound { .. } => StatusCode::NOT_FOUND,
                    OrchestratorError::ImportMissing | OrchestratorError::ValidationInputMissing { .. } => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    OrchestratorError::AlreadyResolved { .. } | OrchestratorError::InvalidTransition { .. } => {
                        StatusCode::CONFLICT
                    }
                    OrchestratorError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    OrchestratorError::Storage { .. }
                    | OrchestratorError::IoError(_)
                    | OrchestratorError::JsonError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind())
            }
            WebServerError::InvalidRequest { .. } | WebServerError::InvalidId { .. } => {
                (StatusCode::BAD_REQUEST, "invalid_input")
            }
            WebServerError::Config(_) | WebServerError::ServerStartup(_) | WebServerError::IoError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl From<JsonRejection> for WebServerError {
    fn from(rejection: JsonRejection) -> Self {
        WebServerError::InvalidRequest {
            details: rejection.body_text(),
        }
    }
}

impl From<SharedError> for WebServerError {
    fn from(err: SharedError) -> Self {
        WebServerError::Orchestrator(err.into())
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = self.to_string();
        if status.is_server_error() {
            error!(kind, error = %message, "Request failed");
        } else {
            warn!(kind, status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = json!({
            "status": "error",
            "error": {
                "kind": kind,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
