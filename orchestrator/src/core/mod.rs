//! Core business logic modules
//!
//! Pure workshop logic with no I/O. Every engine is deterministic given its
//! inputs and `EngineConfig`; generated text arrives already parsed.

pub mod challenge;
pub mod lineage;
pub mod prioritization;
pub mod reconciliation;
pub mod scoring;
pub mod similarity;
pub mod state;
pub mod validation;

pub use prioritization::PrioritizationEngine;
pub use reconciliation::ReconciliationEngine;
pub use similarity::Fingerprint;
pub use state::WorkshopMutation;
pub use validation::ValidationEngine;
