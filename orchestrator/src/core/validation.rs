//! Confidence-weighted benefit validation
//!
//! Confidence comes from the readiness survey, nudged by each use case's own
//! data readiness. It scales the projected benefit through a floor-bounded
//! factor; validated benefits never exceed the original estimate. Generated
//! commentary only supplies the benchmark and reasoning text.

use chrono::{DateTime, Utc};
use generator::BenefitAssessmentSet;
use shared::{GenerationMode, ReadinessSurvey, UseCase, ValidationOutcome, ValidationResult, ValidationSummary};
use std::collections::BTreeSet;

use super::similarity::find_referenced;
use crate::config::EngineConfig;
use crate::error::{OrchestratorError, OrchestratorResult};

const SURVEY_WEIGHT: f64 = 0.7;
const LOW_CONFIDENCE: u8 = 60;
const CONCENTRATION_SHARE: f64 = 0.6;
const DATA_READINESS_GAP: f64 = 3.0;

pub const FLAG_LOW_CONFIDENCE: &str = "low_confidence";
pub const FLAG_NO_QUANTIFIED_BENEFIT: &str = "no_quantified_benefit";
pub const FLAG_DATA_READINESS_GAP: &str = "data_readiness_gap";
pub const FLAG_EFFORT_UNESTIMATED: &str = "effort_unestimated";
pub const FLAG_CONCENTRATION_PREFIX: &str = "benefit_concentration:";

const PLACEHOLDER_BENCHMARK: &str = "Readiness-weighted heuristic (no external benchmark available)";

/// Survey maturity (1..5) mapped onto 0..100
pub fn survey_confidence(survey: &ReadinessSurvey) -> f64 {
    let span = ReadinessSurvey::MAX_SCORE - ReadinessSurvey::MIN_SCORE;
    ((survey.mean_maturity() - ReadinessSurvey::MIN_SCORE) / span * 100.0).clamp(0.0, 100.0)
}

/// Blend survey confidence with the use case's data readiness when it is known
pub fn use_case_confidence(survey_confidence: f64, data_readiness: Option<f64>) -> u8 {
    let blended = match data_readiness {
        Some(readiness) => {
            let readiness_confidence = ((readiness - 1.0) / 9.0 * 100.0).clamp(0.0, 100.0);
            SURVEY_WEIGHT * survey_confidence + (1.0 - SURVEY_WEIGHT) * readiness_confidence
        }
        None => survey_confidence,
    };
    blended.clamp(0.0, 100.0).round() as u8
}

/// `floor + (1 - floor) * c / 100`, non-decreasing and within [floor, 1]
pub fn confidence_factor(confidence: u8, floor: f64) -> f64 {
    let floor = floor.clamp(0.0, 1.0);
    let c = f64::from(confidence.min(100)) / 100.0;
    (floor + (1.0 - floor) * c).clamp(0.0, 1.0)
}

pub fn risk_flags(use_case: &UseCase, confidence: u8) -> BTreeSet<String> {
    let mut flags = BTreeSet::new();
    if confidence < LOW_CONFIDENCE {
        flags.insert(FLAG_LOW_CONFIDENCE.to_string());
    }

    let original = use_case.original_benefit();
    if original <= 0.0 {
        flags.insert(FLAG_NO_QUANTIFIED_BENEFIT.to_string());
    } else if let Some((category, _)) = use_case
        .benefits
        .categories()
        .into_iter()
        .find(|(_, amount)| amount / original > CONCENTRATION_SHARE)
    {
        flags.insert(format!("{FLAG_CONCENTRATION_PREFIX}{category}"));
    }

    if use_case.effort.data_readiness.is_some_and(|r| r <= DATA_READINESS_GAP) {
        flags.insert(FLAG_DATA_READINESS_GAP.to_string());
    }
    if !use_case.effort.is_complete() {
        flags.insert(FLAG_EFFORT_UNESTIMATED.to_string());
    }
    flags
}

pub struct ValidationEngine {
    config: EngineConfig,
}

impl ValidationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Compute one result per use case plus portfolio totals
    ///
    /// `commentary` may cover any subset of the use cases; the rest get
    /// placeholder text. `mode` records where the commentary came from.
    pub fn validate(
        &self,
        use_cases: &[UseCase],
        survey: Option<&ReadinessSurvey>,
        commentary: &BenefitAssessmentSet,
        mode: GenerationMode,
        now: DateTime<Utc>,
    ) -> OrchestratorResult<ValidationOutcome> {
        let survey = survey.ok_or_else(|| OrchestratorError::missing("readiness survey"))?;
        if use_cases.is_empty() {
            return Err(OrchestratorError::missing("reconciled use cases"));
        }

        let base_confidence = survey_confidence(survey);
        let results: Vec<ValidationResult> = use_cases
            .iter()
            .map(|use_case| {
                let confidence = use_case_confidence(base_confidence, use_case.effort.data_readiness);
                let factor = confidence_factor(confidence, self.config.confidence_floor);
                let original = use_case.original_benefit();
                let validated = (original * factor).min(original);

                let assessment = commentary
                    .assessments
                    .iter()
                    .find(|a| find_referenced(&a.target, std::slice::from_ref(use_case)).is_some());
                let (benchmark_source, adjustment_reason) = match assessment {
                    Some(a) if !a.adjustment_reason.trim().is_empty() => {
                        (a.benchmark_source.trim().to_string(), a.adjustment_reason.trim().to_string())
                    }
                    Some(a) => (a.benchmark_source.trim().to_string(), placeholder_reason(confidence, factor)),
                    None => (PLACEHOLDER_BENCHMARK.to_string(), placeholder_reason(confidence, factor)),
                };

                ValidationResult {
                    use_case_id: use_case.id,
                    original_benefit: original,
                    validated_benefit: validated,
                    confidence_level: confidence,
                    adjustment_reason,
                    benchmark_source,
                    risk_flags: risk_flags(use_case, confidence),
                }
            })
            .collect();

        let summary = summarize(&results, mode, now);
        Ok(ValidationOutcome { results, summary })
    }
}

fn placeholder_reason(confidence: u8, factor: f64) -> String {
    format!(
        "Discounted {:.0}% for a readiness confidence of {confidence}/100",
        (1.0 - factor) * 100.0
    )
}

pub fn summarize(results: &[ValidationResult], mode: GenerationMode, now: DateTime<Utc>) -> ValidationSummary {
    let total_original_value = results.iter().map(|r| r.original_benefit).sum::<f64>().min(f64::MAX);
    let total_validated_value = results.iter().map(|r| r.validated_benefit).sum::<f64>().min(f64::MAX);
    let average_confidence = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| f64::from(r.confidence_level)).sum::<f64>() / results.len() as f64
    };
    let overall_discount = if total_original_value > 0.0 {
        (1.0 - total_validated_value / total_original_value).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ValidationSummary {
        total_original_value,
        total_validated_value,
        average_confidence,
        overall_discount,
        mode,
        validated_at: now,
    }
}
