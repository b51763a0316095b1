//! Challenge proposals, severity banding and human resolution

use chrono::{DateTime, Utc};
use generator::{ChallengeProposal, ChallengeProposalSet, UseCaseRef};
use regex::Regex;
use serde_json::Value;
use shared::{BatchId, ChallengeId, ChallengeLogEntry, ChallengeStatus, ChallengeType, Decision, Severity, UseCase};
use std::sync::LazyLock;
use tracing::debug;

use super::similarity::find_referenced;
use crate::error::{OrchestratorError, OrchestratorResult};

/// `$1,250.50`, `-3.5k`, `40%`, `2 million` and friends
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([-+])?\s*[$€£]?\s*([0-9][0-9,]*(?:\.[0-9]+)?|\.[0-9]+)\s*(%|k|thousand|mm|m|million|bn|b|billion)?\s*$")
        .expect("valid amount pattern")
});

const HIGH_DEVIATION: f64 = 0.4;
const MEDIUM_DEVIATION: f64 = 0.15;

/// Numeric reading of a proposal value, if it has one
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount_text(s),
        _ => None,
    }
}

pub fn parse_amount_text(text: &str) -> Option<f64> {
    let caps = AMOUNT.captures(text)?;
    let digits = caps.get(2)?.as_str().replace(',', "");
    let mut amount: f64 = digits.parse().ok()?;

    let multiplier = match caps.get(3).map(|m| m.as_str().to_lowercase()) {
        Some(suffix) => match suffix.as_str() {
            "k" | "thousand" => 1e3,
            "m" | "mm" | "million" => 1e6,
            "b" | "bn" | "billion" => 1e9,
            _ => 1.0,
        },
        None => 1.0,
    };
    amount *= multiplier;

    if caps.get(1).is_some_and(|sign| sign.as_str() == "-") {
        amount = -amount;
    }
    amount.is_finite().then_some(amount)
}

/// Band by relative deviation; anything that is not a pair of numbers is medium
pub fn severity(original: &Value, challenged: &Value) -> Severity {
    match (parse_amount(original), parse_amount(challenged)) {
        (Some(original), Some(challenged)) => {
            if original == 0.0 {
                return if challenged == 0.0 { Severity::Low } else { Severity::High };
            }
            let deviation = (challenged - original).abs() / original.abs();
            if deviation > HIGH_DEVIATION {
                Severity::High
            } else if deviation >= MEDIUM_DEVIATION {
                Severity::Medium
            } else {
                Severity::Low
            }
        }
        _ => Severity::Medium,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whole-dollar amount with thousands separators
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

fn proposal(use_case: &UseCase, challenge_type: ChallengeType, original: Value, challenged: Value, evidence: String) -> ChallengeProposal {
    ChallengeProposal {
        target: UseCaseRef {
            use_case_id: Some(use_case.id.to_string()),
            use_case_title: Some(use_case.title.clone()),
        },
        challenge_type: challenge_type.to_string(),
        original_value: original,
        challenged_value: challenged,
        evidence,
    }
}

/// Deterministic proposals derived from each use case's own inputs
///
/// Benefits get a haircut that grows with complexity; the first assumption,
/// KPI and friction point of each use case are questioned qualitatively.
pub fn fallback_proposals(use_cases: &[UseCase]) -> ChallengeProposalSet {
    let mut challenges = Vec::new();
    for use_case in use_cases {
        let benefit = use_case.original_benefit();
        if benefit > 0.0 {
            let complexity = use_case.effort.complexity.unwrap_or(5.0).clamp(1.0, 10.0);
            let haircut = (0.1 + 0.05 * (complexity - 1.0)).min(0.6);
            challenges.push(proposal(
                use_case,
                ChallengeType::Benefit,
                Value::String(format_currency(benefit)),
                Value::String(format_currency(benefit * (1.0 - haircut))),
                format!(
                    "Comparable programmes at complexity {complexity}/10 typically realise {:.0}% less than projected in the first year.",
                    haircut * 100.0
                ),
            ));
        }
        if let Some(assumption) = use_case.assumptions.first() {
            challenges.push(proposal(
                use_case,
                ChallengeType::Assumption,
                Value::String(assumption.clone()),
                Value::String(format!("Only partially true until validated in a pilot: {assumption}")),
                "Assumption has not been tested against production data.".to_string(),
            ));
        }
        if let Some(kpi) = use_case.kpis.first() {
            challenges.push(proposal(
                use_case,
                ChallengeType::Kpi,
                Value::String(kpi.clone()),
                Value::String(format!("{kpi}, measured against an agreed baseline")),
                "KPI lacks a documented baseline and target.".to_string(),
            ));
        }
        if let Some(friction) = use_case.friction_points.first() {
            challenges.push(proposal(
                use_case,
                ChallengeType::Friction,
                Value::String(friction.clone()),
                Value::String(format!("{friction} is likely to delay adoption by at least one quarter")),
                "Friction points of this kind are commonly underestimated in early estimates.".to_string(),
            ));
        }
    }
    ChallengeProposalSet { challenges }
}

/// Turn proposals into pending entries, dropping any that do not resolve
pub fn build_entries(
    proposals: &ChallengeProposalSet,
    use_cases: &[UseCase],
    batch_id: BatchId,
    now: DateTime<Utc>,
) -> Vec<ChallengeLogEntry> {
    proposals
        .challenges
        .iter()
        .filter_map(|proposal| {
            let Some(use_case) = find_referenced(&proposal.target, use_cases) else {
                debug!(target_ref = ?proposal.target, "Dropping challenge for unknown use case");
                return None;
            };
            let challenge_type = match proposal.challenge_type.parse::<ChallengeType>() {
                Ok(challenge_type) => challenge_type,
                Err(reason) => {
                    debug!(%reason, "Dropping challenge with unknown type");
                    return None;
                }
            };
            Some(ChallengeLogEntry {
                id: ChallengeId::new(),
                use_case_id: use_case.id,
                batch_id,
                challenge_type,
                severity: severity(&proposal.original_value, &proposal.challenged_value),
                original_value: value_text(&proposal.original_value),
                challenged_value: value_text(&proposal.challenged_value),
                evidence: proposal.evidence.trim().to_string(),
                status: ChallengeStatus::Pending,
                responded_by: None,
                responded_at: None,
                created_at: now,
            })
        })
        .collect()
}

/// Apply a one-time human decision to a pending entry
pub fn resolve(
    entry: &mut ChallengeLogEntry,
    decision: Decision,
    responded_by: &str,
    now: DateTime<Utc>,
) -> OrchestratorResult<()> {
    if !entry.is_pending() {
        return Err(OrchestratorError::AlreadyResolved { id: entry.id });
    }
    let responded_by = responded_by.trim();
    if responded_by.is_empty() {
        return Err(OrchestratorError::invalid("respondedBy", "must not be empty"));
    }
    entry.status = decision.into();
    entry.responded_by = Some(responded_by.to_string());
    entry.responded_at = Some(now);
    Ok(())
}
