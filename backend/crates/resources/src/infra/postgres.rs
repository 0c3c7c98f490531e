//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::ResourceId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Resource, ResourceFile};
use crate::domain::repository::ResourceRepository;
use crate::error::ResourceResult;

/// PostgreSQL-backed repository. File bytes are kept in a `BYTEA` column
/// next to the metadata.
#[derive(Clone)]
pub struct PgResourceRepository {
    pool: PgPool,
}

impl PgResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ResourceRepository for PgResourceRepository {
    async fn create(&self, resource: &Resource, content: &[u8]) -> ResourceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO resources (
                resource_id,
                title,
                description,
                category,
                file_name,
                content_type,
                size_bytes,
                content,
                uploaded_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(resource.id.into_uuid())
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.category)
        .bind(&resource.file_name)
        .bind(&resource.content_type)
        .bind(resource.size_bytes)
        .bind(content)
        .bind(&resource.uploaded_by)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            resource_id = %resource.id,
            size_bytes = resource.size_bytes,
            "Resource stored"
        );

        Ok(())
    }

    async fn list(&self) -> ResourceResult<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceRow>(
            r#"
            SELECT
                resource_id,
                title,
                description,
                category,
                file_name,
                content_type,
                size_bytes,
                uploaded_by,
                created_at,
                updated_at
            FROM resources
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResourceRow::into_resource).collect())
    }

    async fn find(&self, id: ResourceId) -> ResourceResult<Option<Resource>> {
        let row = sqlx::query_as::<_, ResourceRow>(
            r#"
            SELECT
                resource_id,
                title,
                description,
                category,
                file_name,
                content_type,
                size_bytes,
                uploaded_by,
                created_at,
                updated_at
            FROM resources
            WHERE resource_id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResourceRow::into_resource))
    }

    async fn update(&self, resource: &Resource) -> ResourceResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE resources
            SET title = $2, description = $3, category = $4, updated_at = $5
            WHERE resource_id = $1
            "#,
        )
        .bind(resource.id.into_uuid())
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.category)
        .bind(resource.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: ResourceId) -> ResourceResult<bool> {
        let deleted = sqlx::query("DELETE FROM resources WHERE resource_id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            tracing::info!(resource_id = %id, "Resource deleted");
        }

        Ok(deleted > 0)
    }

    async fn file(&self, id: ResourceId) -> ResourceResult<Option<ResourceFile>> {
        let row = sqlx::query_as::<_, FileRow>(
            "SELECT file_name, content_type, content FROM resources WHERE resource_id = $1",
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ResourceFile {
            file_name: r.file_name,
            content_type: r.content_type,
            bytes: r.content,
        }))
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct ResourceRow {
    resource_id: Uuid,
    title: String,
    description: Option<String>,
    category: String,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    uploaded_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ResourceRow {
    fn into_resource(self) -> Resource {
        Resource {
            id: ResourceId::from(self.resource_id),
            title: self.title,
            description: self.description,
            category: self.category,
            file_name: self.file_name,
            content_type: self.content_type,
            size_bytes: self.size_bytes,
            uploaded_by: self.uploaded_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    file_name: String,
    content_type: String,
    content: Vec<u8>,
}
