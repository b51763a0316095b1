//! Orchestrator-specific error types

use shared::{ChallengeId, SharedError, WorkshopStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("No import available: attach a ResearchApp or CognitionTwo report before reconciling")]
    ImportMissing,

    #[error("Required input missing: {what}")]
    ValidationInputMissing { what: String },

    #[error("Challenge entry {id} has already been resolved")]
    AlreadyResolved { id: ChallengeId },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: WorkshopStatus, to: WorkshopStatus },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        OrchestratorError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn missing(what: impl Into<String>) -> Self {
        OrchestratorError::ValidationInputMissing { what: what.into() }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        OrchestratorError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name for API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            OrchestratorError::ImportMissing => "import_missing",
            OrchestratorError::ValidationInputMissing { .. } => "validation_input_missing",
            OrchestratorError::AlreadyResolved { .. } => "already_resolved",
            OrchestratorError::NotFound { .. } => "not_found",
            OrchestratorError::InvalidInput { .. } => "invalid_input",
            OrchestratorError::InvalidTransition { .. } => "invalid_transition",
            OrchestratorError::Storage { .. } | OrchestratorError::IoError(_) | OrchestratorError::JsonError(_) => {
                "storage"
            }
        }
    }
}

impl From<SharedError> for OrchestratorError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::InvalidField { field, reason } => OrchestratorError::InvalidInput { field, reason },
            SharedError::InvalidId { input } => OrchestratorError::invalid("id", format!("'{input}' is not a valid identifier")),
            other => OrchestratorError::Storage {
                message: other.to_string(),
            },
        }
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
