//! Readiness survey input and benefit validation output

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{GenerationMode, UseCaseId};

/// Maturity self-assessment captured during the survey step
///
/// Each dimension is scored 1 (ad hoc) to 5 (optimized).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSurvey {
    pub respondent: String,
    pub data_maturity: f64,
    pub process_maturity: f64,
    pub organizational_maturity: f64,
    pub technical_maturity: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ReadinessSurvey {
    pub const MIN_SCORE: f64 = 1.0;
    pub const MAX_SCORE: f64 = 5.0;

    pub fn dimensions(&self) -> [(&'static str, f64); 4] {
        [
            ("dataMaturity", self.data_maturity),
            ("processMaturity", self.process_maturity),
            ("organizationalMaturity", self.organizational_maturity),
            ("technicalMaturity", self.technical_maturity),
        ]
    }

    pub fn mean_maturity(&self) -> f64 {
        let dims = self.dimensions();
        dims.iter().map(|(_, v)| v).sum::<f64>() / dims.len() as f64
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub use_case_id: UseCaseId,
    pub original_benefit: f64,
    pub validated_benefit: f64,
    /// 0..=100
    pub confidence_level: u8,
    pub adjustment_reason: String,
    pub benchmark_source: String,
    pub risk_flags: BTreeSet<String>,
}

/// Portfolio-level totals over one validation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_original_value: f64,
    pub total_validated_value: f64,
    pub average_confidence: f64,
    pub overall_discount: f64,
    pub mode: GenerationMode,
    pub validated_at: DateTime<Utc>,
}
