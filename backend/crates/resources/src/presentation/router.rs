//! Resources Router

use std::sync::Arc;

use auth::AuthConfig;
use auth::application::CheckSessionUseCase;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use crate::application::config::ResourceConfig;
use crate::domain::repository::ResourceRepository;
use crate::infra::postgres::PgResourceRepository;
use crate::presentation::handlers::{self, ResourceAppState};

/// Resource routes backed by PostgreSQL, to be nested under `/api/resources`
pub fn resources_router(
    repo: PgResourceRepository,
    config: ResourceConfig,
    auth: Arc<AuthConfig>,
) -> Router {
    resources_router_generic(repo, config, auth)
}

/// Resource routes for any repository implementation
pub fn resources_router_generic<R>(repo: R, config: ResourceConfig, auth: Arc<AuthConfig>) -> Router
where
    R: ResourceRepository + Clone + Send + Sync + 'static,
{
    let body_limit = config.max_request_bytes();
    let state = ResourceAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        sessions: CheckSessionUseCase::new(auth),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_resources::<R>).post(handlers::create_resource::<R>),
        )
        .route(
            "/{id}",
            axum::routing::patch(handlers::update_resource::<R>)
                .delete(handlers::delete_resource::<R>),
        )
        .route("/{id}/download", get(handlers::download_resource::<R>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
