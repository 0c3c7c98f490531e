//! Create Resource Use Case

use std::sync::Arc;

use auth::SessionClaims;
use chrono::Utc;

use crate::application::config::ResourceConfig;
use crate::domain::entity::{NewResource, Resource};
use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};

pub struct CreateResourceUseCase<R>
where
    R: ResourceRepository,
{
    repo: Arc<R>,
    config: Arc<ResourceConfig>,
}

impl<R> CreateResourceUseCase<R>
where
    R: ResourceRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ResourceConfig>) -> Self {
        Self { repo, config }
    }

    /// `admin` must already hold the admin role.
    pub async fn execute(
        &self,
        admin: &SessionClaims,
        input: NewResource,
    ) -> ResourceResult<Resource> {
        if input.content.len() > self.config.max_upload_bytes {
            return Err(ResourceError::PayloadTooLarge {
                limit: self.config.max_upload_bytes,
            });
        }

        let resource = Resource::create(&input, &admin.sub, Utc::now())?;
        self.repo.create(&resource, &input.content).await?;

        tracing::info!(
            resource_id = %resource.id,
            sub = %admin.sub,
            file_name = %resource.file_name,
            "Resource created"
        );

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::{claims, upload};
    use crate::domain::repository::ResourceRepository;
    use crate::infra::memory::InMemoryResourceRepository;
    use auth::Role;

    #[tokio::test]
    async fn test_create_stores_metadata_and_bytes() {
        let repo = Arc::new(InMemoryResourceRepository::new());
        let use_case = CreateResourceUseCase::new(repo.clone(), Arc::new(ResourceConfig::default()));

        let resource = use_case
            .execute(&claims(Role::Admin), upload("Algebra"))
            .await
            .unwrap();

        assert_eq!(resource.uploaded_by, "ADM00191");
        let file = repo.file(resource.id).await.unwrap().unwrap();
        assert_eq!(file.bytes, b"%PDF-1.7 worksheet");
        assert_eq!(file.file_name, "worksheet.pdf");
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_storage() {
        let repo = Arc::new(InMemoryResourceRepository::new());
        let config = Arc::new(ResourceConfig {
            max_upload_bytes: 4,
        });
        let use_case = CreateResourceUseCase::new(repo.clone(), config);

        let err = use_case
            .execute(&claims(Role::Admin), upload("Too big"))
            .await
            .unwrap_err();

        assert!(matches!(err, ResourceError::PayloadTooLarge { limit: 4 }));
        assert!(repo.is_empty());
    }
}
