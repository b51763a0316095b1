//! Use case records and their import payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{UseCaseId, WorkshopId};

/// External analysis system a use case was imported from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    ResearchApp,
    CognitionTwo,
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSystem::ResearchApp => write!(f, "ResearchApp"),
            SourceSystem::CognitionTwo => write!(f, "CognitionTwo"),
        }
    }
}

/// Which import contributed a field of a reconciled use case
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSource {
    ResearchApp,
    CognitionTwo,
    /// Both sources supplied the field and the values were combined
    Both,
}

impl From<SourceSystem> for FieldSource {
    fn from(source: SourceSystem) -> Self {
        match source {
            SourceSystem::ResearchApp => FieldSource::ResearchApp,
            SourceSystem::CognitionTwo => FieldSource::CognitionTwo,
        }
    }
}

/// Projected financial benefits in currency units per year
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_savings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reduction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_impact: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_flow_improvement: Option<f64>,
}

impl BenefitFields {
    /// Wire names of the benefit categories, in declaration order
    pub const CATEGORIES: [&'static str; 4] = ["costSavings", "riskReduction", "revenueImpact", "cashFlowImprovement"];

    /// Category name paired with its non-negative amount (missing counts as zero)
    pub fn categories(&self) -> [(&'static str, f64); 4] {
        let amount = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(0.0).max(0.0);
        [
            (Self::CATEGORIES[0], amount(self.cost_savings)),
            (Self::CATEGORIES[1], amount(self.risk_reduction)),
            (Self::CATEGORIES[2], amount(self.revenue_impact)),
            (Self::CATEGORIES[3], amount(self.cash_flow_improvement)),
        ]
    }

    /// Sum of all non-negative benefit amounts, saturating at `f64::MAX`
    pub fn total(&self) -> f64 {
        self.categories().iter().map(|(_, v)| v).sum::<f64>().min(f64::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.cost_savings.is_none()
            && self.risk_reduction.is_none()
            && self.revenue_impact.is_none()
            && self.cash_flow_improvement.is_none()
    }
}

/// Delivery effort estimates on a 1..10 scale
///
/// `complexity` and `integration_effort` grow with difficulty, while
/// `data_readiness` grows with how usable the data already is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_readiness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_effort: Option<f64>,
}

impl EffortFields {
    pub fn is_complete(&self) -> bool {
        self.complexity.is_some() && self.data_readiness.is_some() && self.integration_effort.is_some()
    }
}

/// A use case as delivered by one of the import sources
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUseCase {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub benefits: BenefitFields,
    #[serde(flatten)]
    pub effort: EffortFields,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<String>,
    #[serde(default)]
    pub behavioral_patterns: Vec<String>,
    #[serde(default)]
    pub friction_points: Vec<String>,
}

/// A reconciled use case owned by exactly one workshop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub id: UseCaseId,
    pub workshop_id: WorkshopId,
    pub title: String,
    pub description: String,
    /// Field name to the source that supplied it
    #[serde(default)]
    pub provenance: BTreeMap<String, FieldSource>,
    #[serde(flatten)]
    pub benefits: BenefitFields,
    #[serde(flatten)]
    pub effort: EffortFields,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<String>,
    #[serde(default)]
    pub behavioral_patterns: Vec<String>,
    #[serde(default)]
    pub friction_points: Vec<String>,
    pub value_score: f64,
    pub readiness_score: f64,
}

impl UseCase {
    /// An empty use case with unscored inputs
    pub fn new(workshop_id: WorkshopId, title: impl Into<String>) -> Self {
        Self {
            id: UseCaseId::new(),
            workshop_id,
            title: title.into(),
            description: String::new(),
            provenance: BTreeMap::new(),
            benefits: BenefitFields::default(),
            effort: EffortFields::default(),
            assumptions: Vec::new(),
            kpis: Vec::new(),
            behavioral_patterns: Vec::new(),
            friction_points: Vec::new(),
            value_score: 0.0,
            readiness_score: 0.0,
        }
    }

    /// Total projected benefit before any validation discount
    pub fn original_benefit(&self) -> f64 {
        self.benefits.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_use_case_accepts_flat_camel_case_payload() {
        let raw: RawUseCase = serde_json::from_value(json!({
            "title": "Invoice matching",
            "costSavings": 120000.0,
            "complexity": 4,
            "frictionPoints": ["manual lookups"]
        }))
        .unwrap();

        assert_eq!(raw.benefits.cost_savings, Some(120_000.0));
        assert_eq!(raw.effort.complexity, Some(4.0));
        assert_eq!(raw.friction_points, vec!["manual lookups".to_string()]);
        assert!(raw.description.is_empty());
    }

    #[test]
    fn test_benefit_total_ignores_missing_and_negative_amounts() {
        let benefits = BenefitFields {
            cost_savings: Some(100.0),
            risk_reduction: Some(-50.0),
            revenue_impact: None,
            cash_flow_improvement: Some(25.0),
        };
        assert_eq!(benefits.total(), 125.0);
        assert!(!benefits.is_empty());
        assert!(BenefitFields::default().is_empty());
    }
}
