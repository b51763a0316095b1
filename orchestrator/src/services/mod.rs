//! Service implementations
//!
//! Workshop stores behind the `WorkshopRepository` trait.

pub mod file_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

pub use file_store::FileWorkshopStore;
pub use memory_store::MemoryWorkshopStore;

use shared::{Workshop, WorkshopId};

use crate::core::WorkshopMutation;
use crate::error::OrchestratorResult;
use crate::traits::WorkshopRepository;

/// Lets the binary pick a store at runtime behind `Box<dyn WorkshopRepository>`
#[async_trait::async_trait]
impl<T: WorkshopRepository + ?Sized> WorkshopRepository for Box<T> {
    async fn create(&self, workshop: Workshop) -> OrchestratorResult<Workshop> {
        (**self).create(workshop).await
    }

    async fn get(&self, id: WorkshopId) -> OrchestratorResult<Workshop> {
        (**self).get(id).await
    }

    async fn list(&self) -> OrchestratorResult<Vec<Workshop>> {
        (**self).list().await
    }

    async fn apply(&self, id: WorkshopId, mutation: WorkshopMutation) -> OrchestratorResult<Workshop> {
        (**self).apply(id, mutation).await
    }
}
