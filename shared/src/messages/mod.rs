//! Message types exchanged over the workshop HTTP API
//!
//! - `requests`: bodies accepted by the step endpoints
//! - `responses`: step outcomes and derived views returned to the browser

pub mod requests;
pub mod responses;

pub use requests::{
    ChatRequest, ChatTurn, CreateWorkshopRequest, ImportRequest, ResolveChallengeRequest, StatusUpdateRequest,
    SurveySubmission, UseCaseEdit,
};

pub use responses::{
    ChallengeRunOutcome, ChatReply, DashboardView, ReconcileOutcome, ValidationOutcome, WorkflowOutcome,
    WorkshopOverview,
};
