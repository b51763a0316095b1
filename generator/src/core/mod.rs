//! Prompting, boundary parsing and fallback handling

pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod schema;
pub mod structured;

pub use parser::{parse_structured, strip_code_fences, Schema};
pub use schema::{
    BenefitAssessment, BenefitAssessmentSet, ChallengeProposal, ChallengeProposalSet, UseCaseRef, WorkflowDraft,
    WorkflowDraftSet,
};
pub use structured::{mode_for_failure, request_structured, request_text, try_structured, Generated};
