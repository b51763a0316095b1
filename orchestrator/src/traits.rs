//! Trait definitions with mockall annotations for testing
//!
//! The workshop store is the only I/O seam of the orchestrator. Mocks are
//! generated so that step logic can be exercised without a backing store.

use shared::{Workshop, WorkshopId};

use crate::core::WorkshopMutation;
use crate::error::OrchestratorResult;

/// Persistence for workshop documents
///
/// Implementations serialize mutations per workshop: two concurrent `apply`
/// calls on the same workshop never interleave, and each sees the other's
/// committed result. Calls on different workshops may run in parallel.
#[mockall::automock]
#[async_trait::async_trait]
pub trait WorkshopRepository: Send + Sync {
    /// Store a new workshop document
    ///
    /// # Returns
    /// The stored document, or `InvalidInput` if the identifier is taken
    async fn create(&self, workshop: Workshop) -> OrchestratorResult<Workshop>;

    /// Fetch the latest committed document
    async fn get(&self, id: WorkshopId) -> OrchestratorResult<Workshop>;

    /// Every stored workshop, newest first
    async fn list(&self) -> OrchestratorResult<Vec<Workshop>>;

    /// Apply one mutation atomically
    ///
    /// # Parameters
    /// - `id`: Workshop to change
    /// - `mutation`: State transition to apply under the workshop's lock
    ///
    /// # Returns
    /// The committed document. On error nothing is written.
    async fn apply(&self, id: WorkshopId, mutation: WorkshopMutation) -> OrchestratorResult<Workshop>;
}
