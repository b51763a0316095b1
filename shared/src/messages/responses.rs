//! Step outcomes and derived views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BatchId, ChallengeLogEntry, DataLineageEntry, GenerationMode, PrioritizationSummary, PrioritizedUseCase, UseCase,
    ValidationResult, ValidationSummary, WorkflowVisualization, Workshop, WorkshopId, WorkshopStatus,
};

/// Compact listing entry for the workshop index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopOverview {
    pub id: WorkshopId,
    pub company_name: String,
    pub industry: String,
    pub status: WorkshopStatus,
    pub use_case_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Workshop> for WorkshopOverview {
    fn from(workshop: &Workshop) -> Self {
        Self {
            id: workshop.id,
            company_name: workshop.company_name.clone(),
            industry: workshop.industry.clone(),
            status: workshop.status,
            use_case_count: workshop.use_cases.len(),
            created_at: workshop.created_at,
            updated_at: workshop.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutcome {
    pub use_cases: Vec<UseCase>,
    /// Raw entries folded into an earlier survivor
    pub merged_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRunOutcome {
    pub batch_id: BatchId,
    pub entries: Vec<ChallengeLogEntry>,
    pub mode: GenerationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub results: Vec<ValidationResult>,
    pub summary: ValidationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowOutcome {
    pub workflows: Vec<WorkflowVisualization>,
    pub lineage: Vec<DataLineageEntry>,
    pub mode: GenerationMode,
}

/// Everything the final decision screen needs in one payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub workshop: WorkshopOverview,
    pub pending_challenges: usize,
    pub accepted_challenges: usize,
    pub rejected_challenges: usize,
    pub validation: Option<ValidationSummary>,
    pub prioritization: PrioritizationSummary,
    /// Champions first, then the rest of the ranking
    pub recommendations: Vec<PrioritizedUseCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub mode: GenerationMode,
}
