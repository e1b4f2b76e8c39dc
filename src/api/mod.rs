//! Websim Challenge REST API
//!
//! HTTP API layer over the session registry, built with Axum.
//!
//! # Endpoints
//!
//! ## Sessions
//! - `POST /api/v1/sessions` - Create a session
//! - `GET /api/v1/sessions/:sid` - Session snapshot
//! - `DELETE /api/v1/sessions/:sid` - End a session
//! - `POST /api/v1/sessions/:sid/login` - Log in
//! - `POST /api/v1/sessions/:sid/logout` - Log out
//!
//! ## Challenges
//! - `GET /api/v1/sessions/:sid/challenges` - Filtered catalog
//! - `POST /api/v1/sessions/:sid/challenges` - Suggest a challenge
//! - `POST /api/v1/sessions/:sid/challenges/:id/participation` - Join
//! - `DELETE /api/v1/sessions/:sid/challenges/:id/participation` - Cancel
//! - `GET /api/v1/sessions/:sid/challenges/:id/comments` - List comments
//! - `POST /api/v1/sessions/:sid/challenges/:id/comments` - Add a comment
//!
//! ## Participation
//! - `GET /api/v1/sessions/:sid/participations` - Joined challenges
//! - `GET /api/v1/sessions/:sid/report` - Category breakdown
//!
//! ## Views
//! - `GET /api/v1/sessions/:sid/views/:tab` - Render a navigation tab
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use websim_challenge::api::{serve, AppState};
//! use websim_challenge::config::Config;
//! use websim_challenge::sessions::SessionRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let registry = Arc::new(SessionRegistry::new(config.sessions.clone()));
//!
//!     let state = AppState::new(registry, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Session routes
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/:sid",
            get(routes::sessions::get_session).delete(routes::sessions::end_session),
        )
        .route("/sessions/:sid/login", post(routes::sessions::login))
        .route("/sessions/:sid/logout", post(routes::sessions::logout))
        // Challenge routes
        .route(
            "/sessions/:sid/challenges",
            get(routes::challenges::list_challenges).post(routes::challenges::suggest_challenge),
        )
        .route(
            "/sessions/:sid/challenges/:id/participation",
            post(routes::participations::join_challenge)
                .delete(routes::participations::cancel_participation),
        )
        .route(
            "/sessions/:sid/challenges/:id/comments",
            get(routes::comments::list_comments).post(routes::comments::add_comment),
        )
        // Participation routes
        .route(
            "/sessions/:sid/participations",
            get(routes::participations::list_participations),
        )
        .route("/sessions/:sid/report", get(routes::participations::get_report))
        // View routes
        .route("/sessions/:sid/views/:tab", get(routes::views::render_view));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let timeout = TimeoutLayer::new(state.config.request_timeout());

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy from configured origins; no origins means any origin
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Websim Challenge API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Websim Challenge API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionsConfig;
    use crate::sessions::SessionRegistry;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let registry = Arc::new(SessionRegistry::new(SessionsConfig::default()));
        let state = AppState::new(registry, ApiConfig::default());
        build_router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn login(app: &Router, sid: &str, name: &str) {
        let (status, _) = send(
            app,
            "POST",
            &format!("/api/v1/sessions/{}/login", sid),
            Some(json!({"name": name, "password": "anything"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let (status, _) = send(&app, "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();
        new_session(&app).await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["sessions"], 1);
    }

    #[tokio::test]
    async fn test_create_session_has_seed_catalog() {
        let app = create_test_app();
        let (status, body) = send(&app, "POST", "/api/v1/sessions", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["state"]["challenges"].as_array().unwrap().len(), 3);
        assert_eq!(body["state"]["total_points"], 0);
        assert!(body["state"]["user"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let app = create_test_app();
        let (status, body) = send(&app, "GET", "/api/v1/sessions/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_join_and_cancel_scenario() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        login(&app, &sid, "alice").await;

        let join = |id: u32| format!("/api/v1/sessions/{}/challenges/{}/participation", sid, id);

        let (status, body) = send(&app, "POST", &join(1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"]["total_points"], 100);
        assert_eq!(body["changed"], true);

        let (_, body) = send(&app, "POST", &join(2), None).await;
        assert_eq!(body["state"]["total_points"], 300);

        let (status, body) = send(&app, "DELETE", &join(1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notice"], "Participation cancelled.");
        assert_eq!(body["state"]["total_points"], 200);

        let participations = body["state"]["participations"].as_array().unwrap();
        assert_eq!(participations.len(), 1);
        assert_eq!(participations[0]["challenge_id"], 2);
    }

    #[tokio::test]
    async fn test_logged_out_mutations_return_auth_required() {
        let app = create_test_app();
        let sid = new_session(&app).await;

        let requests = [
            (format!("/api/v1/sessions/{}/challenges/1/participation", sid), None),
            (
                format!("/api/v1/sessions/{}/challenges/1/comments", sid),
                Some(json!({"text": "hello"})),
            ),
            (
                format!("/api/v1/sessions/{}/challenges", sid),
                Some(json!({"title": "X", "difficulty": "beginner", "duration": "1week"})),
            ),
        ];

        for (uri, body) in requests {
            let (status, body) = send(&app, "POST", &uri, body).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
        }

        let (_, snapshot) = send(&app, "GET", &format!("/api/v1/sessions/{}", sid), None).await;
        assert_eq!(snapshot["total_points"], 0);
        assert_eq!(snapshot["challenges"].as_array().unwrap().len(), 3);
        assert!(snapshot["comment_counts"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_comments() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        login(&app, &sid, "alice").await;

        let uri = format!("/api/v1/sessions/{}/challenges/2/comments", sid);
        let (status, _) = send(&app, "POST", &uri, Some(json!({"text": "nice!"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["comments"][0]["author"], "alice");
        assert_eq!(body["comments"][0]["text"], "nice!");
        assert_eq!(body["comments"][0]["date"].as_str().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_filter_challenges() {
        let app = create_test_app();
        let sid = new_session(&app).await;

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{}/challenges?difficulty=intermediate", sid),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["challenges"][0]["id"], 2);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{}/challenges?difficulty=expert", sid),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_suggest_challenge() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        login(&app, &sid, "alice").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{}/challenges", sid),
            Some(json!({
                "title": "X",
                "description": "Y",
                "difficulty": "beginner",
                "duration": "1week",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let challenges = body["state"]["challenges"].as_array().unwrap();
        let suggested = &challenges[3];
        assert_eq!(suggested["id"], 4);
        assert_eq!(suggested["category"], "recommended");
        assert!([100, 200, 300].contains(&suggested["points"].as_u64().unwrap()));
    }

    #[tokio::test]
    async fn test_report_and_views() {
        let app = create_test_app();
        let sid = new_session(&app).await;

        let view = format!("/api/v1/sessions/{}/views/my-participation", sid);
        let (status, _) = send(&app, "GET", &view, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        login(&app, &sid, "alice").await;
        send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{}/challenges/3/participation", sid),
            None,
        )
        .await;

        let (status, body) = send(&app, "GET", &view, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tab"], "my-participation");
        assert_eq!(body["total_points"], 300);

        let report_uri = format!("/api/v1/sessions/{}/report", sid);
        let (_, report) = send(&app, "GET", &report_uri, None).await;
        assert_eq!(report["total"], 1);
        assert_eq!(report["slices"][0]["category"], "API Integration");

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{}/views/settings", sid),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_keeps_points() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        login(&app, &sid, "alice").await;
        send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{}/challenges/1/participation", sid),
            None,
        )
        .await;

        let logout_uri = format!("/api/v1/sessions/{}/logout", sid);
        let (status, body) = send(&app, "POST", &logout_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["state"]["user"].is_null());
        assert_eq!(body["state"]["total_points"], 100);
    }

    #[tokio::test]
    async fn test_end_session() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        let uri = format!("/api/v1/sessions/{}", sid);

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_invalid_json() {
        let app = create_test_app();
        let sid = new_session(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{}/login", sid))
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_non_numeric_challenge_id() {
        let app = create_test_app();
        let sid = new_session(&app).await;
        login(&app, &sid, "alice").await;

        let join_uri = format!("/api/v1/sessions/{}/challenges/abc/participation", sid);
        let (status, body) = send(&app, "POST", &join_uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());

        let comments_uri = format!("/api/v1/sessions/{}/challenges/abc/comments", sid);
        let (status, body) = send(&app, "GET", &comments_uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
