//! In-memory workshop store
//!
//! Each workshop sits behind its own mutex; the outer map lock is only held
//! long enough to find the entry.

use async_trait::async_trait;
use chrono::Utc;
use shared::{Workshop, WorkshopId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::core::WorkshopMutation;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::WorkshopRepository;

#[derive(Default)]
pub struct MemoryWorkshopStore {
    workshops: RwLock<HashMap<WorkshopId, Arc<Mutex<Workshop>>>>,
}

impl MemoryWorkshopStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn entry(&self, id: WorkshopId) -> OrchestratorResult<Arc<Mutex<Workshop>>> {
        self.workshops
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| OrchestratorError::not_found("workshop", id))
    }
}

#[async_trait]
impl WorkshopRepository for MemoryWorkshopStore {
    async fn create(&self, workshop: Workshop) -> OrchestratorResult<Workshop> {
        let mut workshops = self.workshops.write().await;
        if workshops.contains_key(&workshop.id) {
            return Err(OrchestratorError::invalid("id", format!("workshop {} already exists", workshop.id)));
        }
        workshops.insert(workshop.id, Arc::new(Mutex::new(workshop.clone())));
        Ok(workshop)
    }

    async fn get(&self, id: WorkshopId) -> OrchestratorResult<Workshop> {
        let entry = self.entry(id).await?;
        let workshop = entry.lock().await;
        Ok(workshop.clone())
    }

    async fn list(&self) -> OrchestratorResult<Vec<Workshop>> {
        let entries: Vec<Arc<Mutex<Workshop>>> = self.workshops.read().await.values().cloned().collect();
        let mut workshops = Vec::with_capacity(entries.len());
        for entry in entries {
            workshops.push(entry.lock().await.clone());
        }
        workshops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(workshops)
    }

    async fn apply(&self, id: WorkshopId, mutation: WorkshopMutation) -> OrchestratorResult<Workshop> {
        let entry = self.entry(id).await?;
        let mut current = entry.lock().await;

        let name = mutation.name();
        let mut working = current.clone();
        mutation.apply(&mut working, Utc::now())?;
        *current = working;

        debug!(workshop = %id, mutation = name, version = current.version, "Applied mutation");
        Ok(current.clone())
    }
}
