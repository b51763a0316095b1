//! Challenge log entries and their review lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{BatchId, ChallengeId, UseCaseId};

/// What part of a use case a challenge disputes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Assumption,
    Kpi,
    Friction,
    Benefit,
}

impl fmt::Display for ChallengeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeType::Assumption => write!(f, "assumption"),
            ChallengeType::Kpi => write!(f, "kpi"),
            ChallengeType::Friction => write!(f, "friction"),
            ChallengeType::Benefit => write!(f, "benefit"),
        }
    }
}

impl FromStr for ChallengeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assumption" | "assumptions" => Ok(ChallengeType::Assumption),
            "kpi" | "kpis" => Ok(ChallengeType::Kpi),
            "friction" => Ok(ChallengeType::Friction),
            "benefit" | "benefits" => Ok(ChallengeType::Benefit),
            _ => Err(format!("Unknown challenge type: {s}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A facilitator's verdict on a pending challenge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

impl From<Decision> for ChallengeStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => ChallengeStatus::Accepted,
            Decision::Reject => ChallengeStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeLogEntry {
    pub id: ChallengeId,
    pub use_case_id: UseCaseId,
    pub batch_id: BatchId,
    pub challenge_type: ChallengeType,
    pub severity: Severity,
    pub original_value: String,
    pub challenged_value: String,
    pub evidence: String,
    pub status: ChallengeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ChallengeLogEntry {
    pub fn is_pending(&self) -> bool {
        self.status == ChallengeStatus::Pending
    }
}
