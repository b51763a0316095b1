//! Workshop orchestration for the AI use-case workshop backend
//!
//! Holds the step engines (reconciliation, challenge, validation,
//! prioritization, lineage), the workshop stores and the orchestrator that
//! sequences them behind the API.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::EngineConfig;
pub use core::{PrioritizationEngine, ReconciliationEngine, ValidationEngine, WorkshopMutation};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::WorkshopOrchestrator;
pub use services::{FileWorkshopStore, MemoryWorkshopStore};
pub use traits::WorkshopRepository;
