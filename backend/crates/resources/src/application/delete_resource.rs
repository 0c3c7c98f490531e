//! Delete Resource Use Case

use std::sync::Arc;

use auth::SessionClaims;
use kernel::id::ResourceId;

use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};

pub struct DeleteResourceUseCase<R>
where
    R: ResourceRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteResourceUseCase<R>
where
    R: ResourceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, admin: &SessionClaims, id: ResourceId) -> ResourceResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ResourceError::NotFound(id));
        }

        tracing::info!(resource_id = %id, sub = %admin.sub, "Resource removed by admin");
        Ok(())
    }
}
