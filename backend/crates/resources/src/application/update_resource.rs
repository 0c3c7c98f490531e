//! Update Resource Use Case

use std::sync::Arc;

use auth::SessionClaims;
use chrono::Utc;
use kernel::id::ResourceId;

use crate::domain::entity::{Resource, ResourcePatch};
use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};

pub struct UpdateResourceUseCase<R>
where
    R: ResourceRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateResourceUseCase<R>
where
    R: ResourceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        admin: &SessionClaims,
        id: ResourceId,
        patch: ResourcePatch,
    ) -> ResourceResult<Resource> {
        let mut resource = self
            .repo
            .find(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        resource.apply(&patch, Utc::now())?;

        // Deleted between find and update
        if !self.repo.update(&resource).await? {
            return Err(ResourceError::NotFound(id));
        }

        tracing::info!(resource_id = %id, sub = %admin.sub, "Resource updated");

        Ok(resource)
    }
}
