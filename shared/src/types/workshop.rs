//! The workshop document and its lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    ChallengeLogEntry, DataLineageEntry, PrioritizationSummary, RawUseCase, ReadinessSurvey, SourceSystem, UseCase,
    ValidationResult, ValidationSummary, WorkflowVisualization, WorkshopId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkshopStatus {
    Draft,
    InProgress,
    Completed,
}

impl WorkshopStatus {
    /// Soft transitions only; a completed workshop may be reopened
    pub fn can_transition_to(&self, next: WorkshopStatus) -> bool {
        matches!(
            (self, next),
            (WorkshopStatus::Draft, WorkshopStatus::InProgress)
                | (WorkshopStatus::InProgress, WorkshopStatus::Completed)
                | (WorkshopStatus::Completed, WorkshopStatus::InProgress)
        ) || *self == next
    }
}

impl fmt::Display for WorkshopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkshopStatus::Draft => write!(f, "draft"),
            WorkshopStatus::InProgress => write!(f, "in_progress"),
            WorkshopStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A raw use-case report attached by one of the import steps
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedSource {
    pub source: SourceSystem,
    pub report_id: String,
    pub use_cases: Vec<RawUseCase>,
    pub imported_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: WorkshopId,
    pub company_name: String,
    pub industry: String,
    pub facilitator_name: String,
    pub status: WorkshopStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented by every applied mutation
    pub version: u64,
    #[serde(default)]
    pub research_report_id: Option<String>,
    #[serde(default)]
    pub cognition_report_id: Option<String>,
    #[serde(default)]
    pub research_import: Option<ImportedSource>,
    #[serde(default)]
    pub cognition_import: Option<ImportedSource>,
    #[serde(default)]
    pub survey: Option<ReadinessSurvey>,
    #[serde(default)]
    pub use_cases: Vec<UseCase>,
    #[serde(default)]
    pub challenge_log: Vec<ChallengeLogEntry>,
    #[serde(default)]
    pub validation_results: Vec<ValidationResult>,
    #[serde(default)]
    pub validation_summary: Option<ValidationSummary>,
    #[serde(default)]
    pub prioritization: Option<PrioritizationSummary>,
    #[serde(default)]
    pub workflows: Vec<WorkflowVisualization>,
    #[serde(default)]
    pub data_lineage: Vec<DataLineageEntry>,
}

impl Workshop {
    pub fn new(company_name: String, industry: String, facilitator_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: WorkshopId::new(),
            company_name,
            industry,
            facilitator_name,
            status: WorkshopStatus::Draft,
            created_at: now,
            updated_at: now,
            version: 0,
            research_report_id: None,
            cognition_report_id: None,
            research_import: None,
            cognition_import: None,
            survey: None,
            use_cases: Vec::new(),
            challenge_log: Vec::new(),
            validation_results: Vec::new(),
            validation_summary: None,
            prioritization: None,
            workflows: Vec::new(),
            data_lineage: Vec::new(),
        }
    }

    pub fn import_for(&self, source: SourceSystem) -> Option<&ImportedSource> {
        match source {
            SourceSystem::ResearchApp => self.research_import.as_ref(),
            SourceSystem::CognitionTwo => self.cognition_import.as_ref(),
        }
    }

    pub fn has_any_import(&self) -> bool {
        self.research_import.is_some() || self.cognition_import.is_some()
    }

    pub fn pending_challenges(&self) -> usize {
        self.challenge_log.iter().filter(|e| e.is_pending()).count()
    }

    /// Drop every result derived from the current use-case inputs
    pub fn invalidate_downstream(&mut self) {
        self.validation_results.clear();
        self.validation_summary = None;
        self.prioritization = None;
    }
}
