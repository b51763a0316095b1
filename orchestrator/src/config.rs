//! Tunable engine parameters

use crate::error::{OrchestratorError, OrchestratorResult};

/// Knobs shared by the reconciliation, validation and prioritization engines
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Token-overlap similarity at or above which two use cases are the same
    pub similarity_threshold: f64,
    /// Score midpoint separating high from low value and readiness
    pub priority_threshold: f64,
    /// Lowest confidence factor applied to a benefit estimate
    pub confidence_floor: f64,
    /// Benefit at or below which the value score bottoms out at 1
    pub value_floor: f64,
    /// Benefit at or above which the value score tops out at 10
    pub value_ceiling: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.8,
            priority_threshold: 7.0,
            confidence_floor: 0.5,
            value_floor: 10_000.0,
            value_ceiling: 10_000_000.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> OrchestratorResult<()> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(OrchestratorError::invalid("similarityThreshold", "must be in (0, 1]"));
        }
        if !(1.0..=10.0).contains(&self.priority_threshold) {
            return Err(OrchestratorError::invalid("priorityThreshold", "must be in 1..=10"));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(OrchestratorError::invalid("confidenceFloor", "must be in 0..=1"));
        }
        if !(self.value_floor > 0.0 && self.value_ceiling > self.value_floor) {
            return Err(OrchestratorError::invalid("valueCeiling", "must exceed a positive value floor"));
        }
        Ok(())
    }
}
