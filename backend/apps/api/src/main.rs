//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::middleware::GateState;
use auth::{AdminCredential, AuthConfig, CredentialValidator, auth_router, with_request_gate};
use axum::Router;
use platform::config::{env_bool, env_list, env_or, env_parse_or, required_env};
use resources::{PgResourceRepository, ResourceConfig, resources_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,resources=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = required_env("DATABASE_URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Admin credential, built once and shared by reference
    let validator = CredentialValidator::new(AdminCredential::new(
        required_env("ADMIN_REGISTRATION_NUMBER")?,
        required_env("ADMIN_PASSWORD")?,
        required_env("ADMIN_EMAIL")?,
        required_env("ADMIN_FULL_NAME")?,
    ));

    let auth_config = Arc::new(load_auth_config()?);
    let resource_config = ResourceConfig {
        max_upload_bytes: env_parse_or(
            "RESOURCE_MAX_UPLOAD_BYTES",
            ResourceConfig::default().max_upload_bytes,
        )?,
    };

    // Build router
    let mut app = Router::new()
        .nest("/api/auth", auth_router(validator, auth_config.clone()))
        .nest(
            "/api/resources",
            resources_router(
                PgResourceRepository::new(pool.clone()),
                resource_config,
                auth_config.clone(),
            ),
        );

    // Pages (including /admin) are served behind the same gate
    if let Ok(static_dir) = std::env::var("STATIC_DIR") {
        tracing::info!(dir = %static_dir, "Serving static pages");
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let gate = GateState::new(auth_config).context("invalid request gate configuration")?;
    let app = with_request_gate(app, gate).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env_parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113)))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Auth settings from the environment. Debug builds fall back to a random
/// session secret, so sessions do not survive a restart.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        match std::env::var("ADMIN_SESSION_SECRET") {
            Ok(secret) => AuthConfig {
                session_secret: decode_secret(&secret)?,
                cookie_secure: false,
                ..AuthConfig::default()
            },
            Err(_) => {
                tracing::warn!("ADMIN_SESSION_SECRET not set, using a random secret");
                AuthConfig::development()
            }
        }
    } else {
        // In production, load secret from environment
        AuthConfig {
            session_secret: decode_secret(&required_env("ADMIN_SESSION_SECRET")?)?,
            ..AuthConfig::default()
        }
    };

    config.cookie_secure = env_bool("COOKIE_SECURE", config.cookie_secure)?;
    config.routes.auth_page = env_or("AUTH_PAGE", &config.routes.auth_page);
    let default_prefixes: Vec<&str> = config.routes.user_prefixes.iter().map(String::as_str).collect();
    config.routes.user_prefixes = env_list("USER_ROUTE_PREFIXES", &default_prefixes);

    if let Ok(origin) = std::env::var("CORS_ORIGIN") {
        let origin = origin.trim();
        config.cors.allow_origin = (!origin.is_empty() && origin != "*").then(|| origin.to_string());
    }

    if config.cors.allow_origin.is_none() {
        tracing::warn!("CORS origin is '*' while credentials are allowed");
    }

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(secret_b64.trim())
        .context("ADMIN_SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("ADMIN_SESSION_SECRET must decode to 32 bytes"))
}
