//! Request bodies for the workshop API

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{BenefitFields, Decision, EffortFields, RawUseCase, WorkshopStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRequest {
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub facilitator_name: String,
}

impl CreateWorkshopRequest {
    pub fn validate(&self) -> SharedResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(SharedError::InvalidField {
                field: "companyName".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub report_id: String,
    #[serde(default)]
    pub use_cases: Vec<RawUseCase>,
}

impl ImportRequest {
    pub fn validate(&self) -> SharedResult<()> {
        if self.report_id.trim().is_empty() {
            return Err(SharedError::InvalidField {
                field: "reportId".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        for (position, use_case) in self.use_cases.iter().enumerate() {
            if use_case.title.trim().is_empty() {
                return Err(SharedError::InvalidField {
                    field: format!("useCases[{position}].title"),
                    reason: "must not be empty".to_string(),
                });
            }
            check_effort_scale(&use_case.effort, &format!("useCases[{position}]."))?;
        }
        Ok(())
    }
}

/// Effort estimates must sit on the 1..=10 scale
fn check_effort_scale(effort: &EffortFields, prefix: &str) -> SharedResult<()> {
    let fields = [
        ("complexity", effort.complexity),
        ("dataReadiness", effort.data_readiness),
        ("integrationEffort", effort.integration_effort),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            if !(1.0..=10.0).contains(&value) {
                return Err(SharedError::InvalidField {
                    field: format!("{prefix}{field}"),
                    reason: format!("{value} is outside 1..=10"),
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub respondent: String,
    pub data_maturity: f64,
    pub process_maturity: f64,
    pub organizational_maturity: f64,
    pub technical_maturity: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SurveySubmission {
    pub fn validate(&self) -> SharedResult<()> {
        let dimensions = [
            ("dataMaturity", self.data_maturity),
            ("processMaturity", self.process_maturity),
            ("organizationalMaturity", self.organizational_maturity),
            ("technicalMaturity", self.technical_maturity),
        ];
        for (field, value) in dimensions {
            if !(1.0..=5.0).contains(&value) {
                return Err(SharedError::InvalidField {
                    field: field.to_string(),
                    reason: format!("{value} is outside 1..=5"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: WorkshopStatus,
}

/// Partial edit of a use case's inputs; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseEdit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub benefits: BenefitFields,
    #[serde(flatten)]
    pub effort: EffortFields,
}

impl UseCaseEdit {
    pub fn validate(&self) -> SharedResult<()> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err(SharedError::InvalidField {
                field: "title".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        check_effort_scale(&self.effort, "")
    }

    /// Whether the edit touches an input that feeds validation or scoring
    pub fn touches_scoring_inputs(&self) -> bool {
        !self.benefits.is_empty()
            || self.effort.complexity.is_some()
            || self.effort.data_readiness.is_some()
            || self.effort.integration_effort.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveChallengeRequest {
    pub decision: Decision,
    pub responded_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}
