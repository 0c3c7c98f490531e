//! Repository Traits
//!
//! Interfaces for resource persistence. Implementations are in the
//! infrastructure layer.

use kernel::id::ResourceId;

use crate::domain::entity::{Resource, ResourceFile};
use crate::error::ResourceResult;

#[trait_variant::make(ResourceRepository: Send)]
pub trait LocalResourceRepository {
    /// Store metadata and file bytes together
    async fn create(&self, resource: &Resource, content: &[u8]) -> ResourceResult<()>;

    /// All resources, newest first
    async fn list(&self) -> ResourceResult<Vec<Resource>>;

    async fn find(&self, id: ResourceId) -> ResourceResult<Option<Resource>>;

    /// Overwrite metadata. Returns false if the resource is gone.
    async fn update(&self, resource: &Resource) -> ResourceResult<bool>;

    /// Returns false if nothing was deleted
    async fn delete(&self, id: ResourceId) -> ResourceResult<bool>;

    async fn file(&self, id: ResourceId) -> ResourceResult<Option<ResourceFile>>;
}
