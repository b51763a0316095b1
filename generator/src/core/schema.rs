//! Expected payload shapes for each generation-backed step

use serde::Deserialize;

use super::parser::Schema;

/// How a generated item points back at a use case
///
/// Models echo either the identifier they were given or the title; both are
/// accepted and resolved by the engines.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseRef {
    #[serde(default, alias = "use_case_id", alias = "id")]
    pub use_case_id: Option<String>,
    #[serde(default, alias = "use_case_title", alias = "useCase", alias = "title")]
    pub use_case_title: Option<String>,
}

impl UseCaseRef {
    pub fn is_empty(&self) -> bool {
        self.use_case_id.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.use_case_title.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProposal {
    #[serde(flatten)]
    pub target: UseCaseRef,
    #[serde(alias = "type", alias = "challenge_type")]
    pub challenge_type: String,
    #[serde(alias = "original_value", alias = "original")]
    pub original_value: serde_json::Value,
    #[serde(alias = "challenged_value", alias = "challenged", alias = "alternative")]
    pub challenged_value: serde_json::Value,
    #[serde(default)]
    pub evidence: String,
}

/// `{"challenges": [...]}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChallengeProposalSet {
    pub challenges: Vec<ChallengeProposal>,
}

impl Schema for ChallengeProposalSet {
    const SHAPE: &'static str = "challenge proposals";

    fn check(&self) -> Result<(), String> {
        if self.challenges.is_empty() {
            return Err("challenges is empty".to_string());
        }
        if let Some(i) = self.challenges.iter().position(|c| c.target.is_empty()) {
            return Err(format!("challenges[{i}] does not reference a use case"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenefitAssessment {
    #[serde(flatten)]
    pub target: UseCaseRef,
    #[serde(alias = "benchmark_source", alias = "benchmark")]
    pub benchmark_source: String,
    #[serde(default, alias = "adjustment_reason", alias = "reason")]
    pub adjustment_reason: String,
}

/// `{"assessments": [...]}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenefitAssessmentSet {
    pub assessments: Vec<BenefitAssessment>,
}

impl Schema for BenefitAssessmentSet {
    const SHAPE: &'static str = "benefit assessments";

    fn check(&self) -> Result<(), String> {
        if self.assessments.is_empty() {
            return Err("assessments is empty".to_string());
        }
        if let Some(i) = self
            .assessments
            .iter()
            .position(|a| a.target.is_empty() || a.benchmark_source.trim().is_empty())
        {
            return Err(format!("assessments[{i}] is missing a use case or benchmark source"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDraft {
    #[serde(flatten)]
    pub target: UseCaseRef,
    pub steps: Vec<String>,
    #[serde(default, alias = "data_sources")]
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub explainability: String,
    #[serde(default)]
    pub observability: String,
    #[serde(default)]
    pub governance: String,
}

/// `{"workflows": [...]}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WorkflowDraftSet {
    pub workflows: Vec<WorkflowDraft>,
}

impl Schema for WorkflowDraftSet {
    const SHAPE: &'static str = "workflow drafts";

    fn check(&self) -> Result<(), String> {
        if self.workflows.is_empty() {
            return Err("workflows is empty".to_string());
        }
        if let Some(i) = self
            .workflows
            .iter()
            .position(|w| w.target.is_empty() || w.steps.iter().all(|s| s.trim().is_empty()))
        {
            return Err(format!("workflows[{i}] is missing a use case or steps"));
        }
        Ok(())
    }
}
