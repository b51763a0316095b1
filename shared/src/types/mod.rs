//! Core shared types and identifiers
//!
//! Everything a workshop document embeds lives under this module. The wire
//! format is camelCase JSON throughout.

pub mod challenge;
pub mod lineage;
pub mod prioritization;
pub mod use_case;
pub mod validation;
pub mod workshop;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub use challenge::{ChallengeLogEntry, ChallengeStatus, ChallengeType, Decision, Severity};
pub use lineage::{DataLineageEntry, WorkflowVisualization};
pub use prioritization::{PrioritizationSummary, PrioritizedUseCase, Quadrant, Track};
pub use use_case::{BenefitFields, EffortFields, FieldSource, RawUseCase, SourceSystem, UseCase};
pub use validation::{ReadinessSurvey, ValidationResult, ValidationSummary};
pub use workshop::{ImportedSource, Workshop, WorkshopStatus};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a workshop document
    WorkshopId
);
uuid_id!(
    /// Unique identifier for a reconciled use case
    UseCaseId
);
uuid_id!(
    /// Unique identifier for a challenge log entry
    ChallengeId
);
uuid_id!(
    /// Identifier shared by every entry produced in one challenge run
    BatchId
);

/// How generated content was obtained for a step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Content came from the configured LLM provider
    Live,
    /// The provider failed or returned unusable content; placeholders were used
    Fallback,
    /// No provider is configured; placeholders are always used
    Demo,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Live => write!(f, "live"),
            GenerationMode::Fallback => write!(f, "fallback"),
            GenerationMode::Demo => write!(f, "demo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_parse_from_display() {
        let id = WorkshopId::new();
        let parsed: WorkshopId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(UseCaseId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = ChallengeId::from_string("550e8400-e29b-41d4-a716-446655440001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440001\"");
    }

    #[test]
    fn test_generation_mode_wire_names() {
        assert_eq!(serde_json::to_string(&GenerationMode::Fallback).unwrap(), "\"fallback\"");
        assert_eq!(GenerationMode::Demo.to_string(), "demo");
    }
}
