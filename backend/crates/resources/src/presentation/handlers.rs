//! HTTP Handlers
//!
//! Listing is public. Mutations extract [`RequireAdmin`] and downloads
//! pass the caller's [`Authorization`](auth::Authorization) to the use case,
//! so each handler checks the signed session itself.

use std::sync::Arc;

use auth::application::CheckSessionUseCase;
use auth::extract::{CurrentAuthorization, RequireAdmin};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRef, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::id::ResourceId;

use crate::application::config::ResourceConfig;
use crate::application::{
    CreateResourceUseCase, DeleteResourceUseCase, DownloadResourceUseCase, ListResourcesUseCase,
    UpdateResourceUseCase,
};
use crate::domain::repository::ResourceRepository;
use crate::error::{ResourceError, ResourceResult};
use crate::presentation::dto::{CreateResourceRequest, ResourceResponse, UpdateResourceRequest};

/// Shared state for resource handlers
#[derive(Clone)]
pub struct ResourceAppState<R>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ResourceConfig>,
    pub sessions: CheckSessionUseCase,
}

impl<R> FromRef<ResourceAppState<R>> for CheckSessionUseCase
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &ResourceAppState<R>) -> Self {
        state.sessions.clone()
    }
}

/// Body-limit rejections become 413, everything else 400.
fn body_error(rejection: JsonRejection, config: &ResourceConfig) -> ResourceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ResourceError::PayloadTooLarge {
            limit: config.max_upload_bytes,
        }
    } else {
        ResourceError::Validation(rejection.body_text())
    }
}

/// Parses the `{id}` segment; malformed ids are a 400 problem document.
fn resource_id(path: Result<Path<String>, PathRejection>) -> ResourceResult<ResourceId> {
    let Path(raw) = path.map_err(|e| ResourceError::Validation(e.body_text()))?;
    raw.parse()
        .map_err(|_| ResourceError::Validation(format!("'{raw}' is not a resource id")))
}

/// GET /api/resources
pub async fn list_resources<R>(
    State(state): State<ResourceAppState<R>>,
) -> ResourceResult<Json<Vec<ResourceResponse>>>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let resources = ListResourcesUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

/// POST /api/resources
pub async fn create_resource<R>(
    State(state): State<ResourceAppState<R>>,
    RequireAdmin(admin): RequireAdmin,
    payload: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> ResourceResult<impl IntoResponse>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| body_error(e, &state.config))?;

    let resource = CreateResourceUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&admin, req.into_new_resource()?)
        .await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from(resource))))
}

/// PATCH /api/resources/{id}
pub async fn update_resource<R>(
    State(state): State<ResourceAppState<R>>,
    RequireAdmin(admin): RequireAdmin,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> ResourceResult<Json<ResourceResponse>>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let id = resource_id(id)?;
    let Json(req) = payload.map_err(|e| body_error(e, &state.config))?;

    let resource = UpdateResourceUseCase::new(state.repo.clone())
        .execute(&admin, id, req.into())
        .await?;

    Ok(Json(resource.into()))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource<R>(
    State(state): State<ResourceAppState<R>>,
    RequireAdmin(admin): RequireAdmin,
    id: Result<Path<String>, PathRejection>,
) -> ResourceResult<StatusCode>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let id = resource_id(id)?;
    DeleteResourceUseCase::new(state.repo.clone())
        .execute(&admin, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/resources/{id}/download
pub async fn download_resource<R>(
    State(state): State<ResourceAppState<R>>,
    CurrentAuthorization(authorization): CurrentAuthorization,
    id: Result<Path<String>, PathRejection>,
) -> ResourceResult<impl IntoResponse>
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let id = resource_id(id)?;
    let file = DownloadResourceUseCase::new(state.repo.clone())
        .execute(&authorization, id)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_DISPOSITION, content_disposition(&file.file_name)),
        ],
        file.bytes,
    ))
}

/// `attachment` with an ASCII fallback name plus the RFC 5987 UTF-8 form.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}
