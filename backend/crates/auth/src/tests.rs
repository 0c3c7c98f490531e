//! Router-level tests for the admin gate
//!
//! Drives the real router (login endpoints + request gate) with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::CredentialValidator;
use crate::domain::entity::AdminCredential;
use crate::presentation::middleware::GateState;
use crate::presentation::router::{auth_router, with_request_gate};

const PASSWORD: &str = "s3cret-tutor-pass";

/// Fresh app with its own random session secret
fn app() -> Router {
    app_with(AuthConfig::development())
}

/// Unmatched paths fall through to a stand-in for the static file service.
fn app_with(config: AuthConfig) -> Router {
    let config = Arc::new(config);
    let validator = CredentialValidator::new(AdminCredential::new(
        "ADM00191",
        PASSWORD,
        "admin@example.com",
        "Ada Admin",
    ));

    let router = Router::new()
        .nest("/api/auth", auth_router(validator, config.clone()))
        .route("/admin", get(|| async { "dashboard" }))
        .route("/admin/{*rest}", get(|| async { "admin page" }))
        .route("/courses", get(|| async { "courses" }))
        .route("/dashboard", get(|| async { "user dashboard" }))
        .route("/api/ping", get(|| async { "pong" }))
        .route("/api/admin/stats", get(|| async { "stats" }))
        .fallback(|| async { "static file" });

    let gate = GateState::new(config).expect("valid gate config");
    with_request_gate(router, gate)
}

fn login_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/auth/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookies(path: &str, cookies: &str) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` pairs from Set-Cookie headers, joined for a Cookie header
fn cookie_header(set_cookies: &[String]) -> String {
    set_cookies
        .iter()
        .map(|c| c.split(';').next().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET,DELETE,PATCH,POST,PUT,OPTIONS"
    );
    assert!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .contains("Content-Type")
    );
}

async fn sign_in(app: &Router) -> Vec<String> {
    let response = app
        .clone()
        .oneshot(login_request(
            json!({ "registrationNumber": "ADM00191", "password": PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    set_cookies(&response)
}

mod login {
    use super::*;

    #[tokio::test]
    async fn test_correct_credentials_set_both_cookies() {
        let response = app()
            .oneshot(login_request(
                json!({ "registrationNumber": "ADM00191", "password": PASSWORD }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);

        let cookies = set_cookies(&response);
        assert_eq!(cookies.len(), 2);

        let flag = cookies.iter().find(|c| c.starts_with("admin-auth=")).unwrap();
        assert!(flag.starts_with("admin-auth=true;"));
        assert!(flag.contains("Max-Age=604800"));
        assert!(!flag.contains("HttpOnly"));

        let session = cookies.iter().find(|c| c.starts_with("admin-session=")).unwrap();
        assert!(!session.starts_with("admin-session=;"));
        assert!(session.contains("Max-Age=604800"));
        assert!(session.contains("HttpOnly"));

        let body = json_body(response).await;
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["redirectUrl"], "/admin");
        assert_eq!(body["profile"]["email"], "admin@example.com");
        assert_eq!(body["profile"]["fullName"], "Ada Admin");
        assert_eq!(body["profile"]["role"], "admin");
        assert_eq!(body["user"]["id"], "ADM00191");
        assert_eq!(body["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_is_401_without_cookies() {
        let response = app()
            .oneshot(login_request(
                json!({ "registrationNumber": "ADM00191", "password": "wrong" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&response).is_empty());
        assert_cors(&response);

        let body = json_body(response).await;
        assert_eq!(body["detail"], "Invalid registration number or password");
    }

    #[tokio::test]
    async fn test_missing_password_is_400() {
        let response = app()
            .oneshot(login_request(json!({ "registrationNumber": "" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookies(&response).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/admin/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"registrationNumber\":"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

mod gate {
    use super::*;

    #[tokio::test]
    async fn test_admin_paths_without_flag_redirect_with_callback() {
        for (path, encoded) in [
            ("/admin", "%2Fadmin"),
            ("/admin/resources", "%2Fadmin%2Fresources"),
            ("/admin/contacts/17", "%2Fadmin%2Fcontacts%2F17"),
        ] {
            let response = app().oneshot(get_with_cookies(path, "")).await.unwrap();

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
            assert_eq!(
                response.headers()[header::LOCATION],
                format!("/auth?callbackUrl={encoded}&mode=admin").as_str()
            );
        }
    }

    #[tokio::test]
    async fn test_flag_without_signed_session_redirects() {
        let response = app()
            .oneshot(get_with_cookies("/admin", "admin-auth=true"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_signed_in_admin_reaches_page_and_flag_slides() {
        let app = app();
        let cookies = cookie_header(&sign_in(&app).await);

        let response = app
            .oneshot(get_with_cookies("/admin/resources", &cookies))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let refreshed = set_cookies(&response);
        assert_eq!(refreshed.len(), 1);
        assert!(refreshed[0].starts_with("admin-auth=true;"));
        assert!(refreshed[0].contains("Max-Age=604800"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"admin page");
    }

    #[tokio::test]
    async fn test_alternate_admin_spellings_redirect() {
        for path in [
            "/%61dmin/index.html",
            "//admin/index.html",
            "/./admin/index.html",
            "/courses/../admin/index.html",
            "/admin/../courses",
        ] {
            let response = app().oneshot(get_with_cookies(path, "")).await.unwrap();

            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
            let location = response.headers()[header::LOCATION].to_str().unwrap();
            assert!(location.starts_with("/auth?callbackUrl=%2F"), "{location}");
            assert!(!location.starts_with("/auth?callbackUrl=%2F%2F"), "{location}");
        }
    }

    #[tokio::test]
    async fn test_undecodable_path_fails_closed() {
        let response = app()
            .oneshot(get_with_cookies("/%FF%FE/index.html", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_alternate_spelling_allowed_with_session() {
        let app = app();
        let cookies = cookie_header(&sign_in(&app).await);

        let response = app
            .oneshot(get_with_cookies("/%61dmin/index.html", &cookies))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"static file");
    }

    #[tokio::test]
    async fn test_api_rooted_admin_redirect_carries_cors() {
        let mut config = AuthConfig::development();
        config.routes.admin_root = "/api/admin".to_string();
        let app = app_with(config);

        let response = app
            .clone()
            .oneshot(get_with_cookies("/api/admin/stats", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/auth?callbackUrl=%2Fapi%2Fadmin%2Fstats&mode=admin"
        );
        assert_cors(&response);

        let cookies = cookie_header(&sign_in(&app).await);
        let response = app
            .oneshot(get_with_cookies("/api/admin/stats", &cookies))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(set_cookies(&response).len(), 1);
    }

    #[tokio::test]
    async fn test_session_from_other_secret_is_rejected() {
        let cookies = cookie_header(&sign_in(&app()).await);

        // Different random secret
        let response = app()
            .oneshot(get_with_cookies("/admin", &cookies))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_user_route_needs_user_flag() {
        let response = app().oneshot(get_with_cookies("/dashboard", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/auth?callbackUrl=%2Fdashboard"
        );

        let response = app()
            .oneshot(get_with_cookies("/dashboard", "user-auth=true"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_page_untouched() {
        let response = app().oneshot(get_with_cookies("/courses", "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty());
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_api_responses_carry_cors() {
        for path in ["/api/ping", "/api/does-not-exist", "/api/auth/admin/session"] {
            let response = app().oneshot(get_with_cookies(path, "")).await.unwrap();
            assert_cors(&response);
        }
    }

    #[tokio::test]
    async fn test_api_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/admin/login")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_cors(&response);
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn test_status_reflects_signed_session() {
        let response = app()
            .oneshot(get_with_cookies("/api/auth/admin/session", ""))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["authenticated"], false);
        assert!(body["user"].is_null());

        let app = app();
        let cookies = cookie_header(&sign_in(&app).await);
        let response = app
            .oneshot(get_with_cookies("/api/auth/admin/session", &cookies))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["id"], "ADM00191");
        let expires_at_ms = body["expiresAtMs"].as_i64().unwrap();
        let week_ms = chrono::Duration::days(7).num_milliseconds();
        let now_ms = chrono::Utc::now().timestamp_millis();
        assert!((expires_at_ms - (now_ms + week_ms)).abs() < 60_000);
        assert_eq!(expires_at_ms % 1000, 0);
    }

    #[tokio::test]
    async fn test_logout_clears_both_cookies() {
        let app = app();
        let cookies = cookie_header(&sign_in(&app).await);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/admin/logout")
            .header(header::COOKIE, cookies)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = set_cookies(&response);
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().any(|c| c.starts_with("admin-auth=;")));
        assert!(cleared.iter().any(|c| c.starts_with("admin-session=;")));
        assert!(cleared.iter().all(|c| c.contains("Max-Age=-1")));
    }
}
