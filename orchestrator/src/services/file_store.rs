//! File-backed workshop store
//!
//! One pretty-printed JSON document per workshop under the base directory.
//! Writes go to a hidden temp file that is then renamed over the document, so
//! readers never observe a half-written file.

use async_trait::async_trait;
use chrono::Utc;
use shared::{Workshop, WorkshopId};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::WorkshopMutation;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::WorkshopRepository;

pub struct FileWorkshopStore {
    base_dir: PathBuf,
    locks: Mutex<HashMap<WorkshopId, Arc<Mutex<()>>>>,
}

impl FileWorkshopStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed
    pub async fn open(base_dir: impl Into<PathBuf>) -> OrchestratorResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await.map_err(|e| OrchestratorError::Storage {
            message: format!("cannot create {}: {e}", base_dir.display()),
        })?;
        Ok(Self {
            base_dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn document_path(&self, id: WorkshopId) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    async fn lock_for(&self, id: WorkshopId) -> Arc<Mutex<()>> {
        self.locks.lock().await.entry(id).or_default().clone()
    }

    async fn read_document(&self, id: WorkshopId) -> OrchestratorResult<Workshop> {
        let bytes = match fs::read(self.document_path(id)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(OrchestratorError::not_found("workshop", id)),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_document(&self, workshop: &Workshop) -> OrchestratorResult<()> {
        let body = serde_json::to_vec_pretty(workshop)?;
        let temp_path = self.base_dir.join(format!(".{}.json.tmp", workshop.id));

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&body).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, self.document_path(workshop.id)).await?;
        Ok(())
    }
}

#[async_trait]
impl WorkshopRepository for FileWorkshopStore {
    async fn create(&self, workshop: Workshop) -> OrchestratorResult<Workshop> {
        let lock = self.lock_for(workshop.id).await;
        let _guard = lock.lock().await;

        if fs::try_exists(self.document_path(workshop.id)).await? {
            return Err(OrchestratorError::invalid("id", format!("workshop {} already exists", workshop.id)));
        }
        self.write_document(&workshop).await?;
        Ok(workshop)
    }

    async fn get(&self, id: WorkshopId) -> OrchestratorResult<Workshop> {
        self.read_document(id).await
    }

    async fn list(&self) -> OrchestratorResult<Vec<Workshop>> {
        let mut workshops = Vec::new();
        let mut entries = fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_document = path.extension().is_some_and(|ext| ext == "json")
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_document {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match serde_json::from_slice::<Workshop>(&bytes) {
                Ok(workshop) => workshops.push(workshop),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable workshop document"),
            }
        }
        workshops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(workshops)
    }

    async fn apply(&self, id: WorkshopId, mutation: WorkshopMutation) -> OrchestratorResult<Workshop> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let name = mutation.name();
        let mut workshop = self.read_document(id).await?;
        mutation.apply(&mut workshop, Utc::now())?;
        self.write_document(&workshop).await?;

        debug!(workshop = %id, mutation = name, version = workshop.version, "Persisted mutation");
        Ok(workshop)
    }
}
