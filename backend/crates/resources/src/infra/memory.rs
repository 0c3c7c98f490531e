//! In-Memory Repository
//!
//! Process-local store for tests and for running the API without a
//! database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kernel::id::ResourceId;

use crate::domain::entity::{Resource, ResourceFile};
use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};

type Entries = HashMap<ResourceId, (Resource, Vec<u8>)>;

#[derive(Clone, Default)]
pub struct InMemoryResourceRepository {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> ResourceResult<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|_| ResourceError::Internal("resource store lock poisoned".into()))
    }

    fn write(&self) -> ResourceResult<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|_| ResourceError::Internal("resource store lock poisoned".into()))
    }
}

impl ResourceRepository for InMemoryResourceRepository {
    async fn create(&self, resource: &Resource, content: &[u8]) -> ResourceResult<()> {
        self.write()?
            .insert(resource.id, (resource.clone(), content.to_vec()));
        Ok(())
    }

    async fn list(&self) -> ResourceResult<Vec<Resource>> {
        let mut resources: Vec<Resource> =
            self.read()?.values().map(|(r, _)| r.clone()).collect();
        resources.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(resources)
    }

    async fn find(&self, id: ResourceId) -> ResourceResult<Option<Resource>> {
        Ok(self.read()?.get(&id).map(|(r, _)| r.clone()))
    }

    async fn update(&self, resource: &Resource) -> ResourceResult<bool> {
        match self.write()?.get_mut(&resource.id) {
            Some((stored, _)) => {
                *stored = resource.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ResourceId) -> ResourceResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn file(&self, id: ResourceId) -> ResourceResult<Option<ResourceFile>> {
        Ok(self.read()?.get(&id).map(|(r, bytes)| ResourceFile {
            file_name: r.file_name.clone(),
            content_type: r.content_type.clone(),
            bytes: bytes.clone(),
        }))
    }
}
