//! List Resources Use Case

use std::sync::Arc;

use crate::domain::entity::Resource;
use crate::domain::repository::ResourceRepository;
use crate::error::ResourceResult;

pub struct ListResourcesUseCase<R>
where
    R: ResourceRepository,
{
    repo: Arc<R>,
}

impl<R> ListResourcesUseCase<R>
where
    R: ResourceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public metadata listing, newest first.
    pub async fn execute(&self) -> ResourceResult<Vec<Resource>> {
        self.repo.list().await
    }
}
