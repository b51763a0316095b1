//! Shared types for the AI use-case workshop backend
//!
//! Contains the workshop document model, the HTTP API message shapes and the
//! logging setup used by every crate in the workspace.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    // Request bodies
    ChatRequest, ChatTurn, CreateWorkshopRequest, ImportRequest, ResolveChallengeRequest, StatusUpdateRequest,
    SurveySubmission, UseCaseEdit,

    // Step outcomes and views
    ChallengeRunOutcome, ChatReply, DashboardView, ReconcileOutcome, ValidationOutcome, WorkflowOutcome,
    WorkshopOverview,
};
