//! Download Resource Use Case

use std::sync::Arc;

use auth::{Authorization, Role};
use kernel::id::ResourceId;

use crate::domain::entity::ResourceFile;
use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};

pub struct DownloadResourceUseCase<R>
where
    R: ResourceRepository,
{
    repo: Arc<R>,
}

impl<R> DownloadResourceUseCase<R>
where
    R: ResourceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// File bytes for any caller with a valid session.
    pub async fn execute(
        &self,
        authorization: &Authorization,
        id: ResourceId,
    ) -> ResourceResult<ResourceFile> {
        let claims = authorization.require(Role::User)?;

        let file = self
            .repo
            .file(id)
            .await?
            .ok_or(ResourceError::NotFound(id))?;

        tracing::debug!(resource_id = %id, sub = %claims.sub, "Resource downloaded");
        Ok(file)
    }
}
