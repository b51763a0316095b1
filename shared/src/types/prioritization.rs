//! Prioritization buckets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::UseCaseId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// High value, high readiness
    Champion,
    /// Lower value, high readiness
    #[serde(rename = "Quick Win")]
    QuickWin,
    /// High value, lower readiness
    Strategic,
    /// Lower value, lower readiness
    Foundation,
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quadrant::Champion => write!(f, "Champion"),
            Quadrant::QuickWin => write!(f, "Quick Win"),
            Quadrant::Strategic => write!(f, "Strategic"),
            Quadrant::Foundation => write!(f, "Foundation"),
        }
    }
}

/// Delivery horizon
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Track {
    /// 0-12 months
    T1,
    /// 6-24 months
    T2,
    /// 12-36 months
    T3,
}

impl Track {
    pub fn horizon(&self) -> &'static str {
        match self {
            Track::T1 => "0-12 months",
            Track::T2 => "6-24 months",
            Track::T3 => "12-36 months",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedUseCase {
    pub use_case_id: UseCaseId,
    pub title: String,
    pub value_score: f64,
    pub readiness_score: f64,
    pub quadrant: Quadrant,
    pub track: Track,
    /// 1-based, best first
    pub rank: usize,
    /// Benefit the value score was derived from
    pub benefit_basis: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizationSummary {
    pub items: Vec<PrioritizedUseCase>,
    pub quadrant_counts: BTreeMap<Quadrant, usize>,
    pub track_counts: BTreeMap<Track, usize>,
    pub threshold: f64,
    pub computed_at: DateTime<Utc>,
}
