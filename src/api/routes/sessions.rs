//! Session Routes
//!
//! Session lifecycle and identity.
//!
//! - POST /api/v1/sessions - Create a session
//! - GET /api/v1/sessions/:sid - Session snapshot
//! - DELETE /api/v1/sessions/:sid - End a session
//! - POST /api/v1/sessions/:sid/login - Log in (no credential check)
//! - POST /api/v1/sessions/:sid/logout - Log out

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ActionResponse, CreateSessionResponse, LoginRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::{Command, SessionSnapshot};

/// POST /api/v1/sessions
///
/// Create a session with the seed catalog and nobody logged in.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<CreateSessionResponse>)> {
    let (session_id, handle) = state.registry.create().await?;
    let snapshot = handle.lock().await.snapshot();

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            state: snapshot,
        }),
    ))
}

/// GET /api/v1/sessions/:sid
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionSnapshot>> {
    let snapshot = state
        .registry
        .with_session(&session_id, |store| store.snapshot())
        .await?;

    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:sid
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry.remove(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:sid/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<ActionResponse>> {
    let Json(req) = body?;
    let command = Command::Login {
        name: req.name,
        password: req.password,
    };
    dispatch(&state, &session_id, command).await.map(Json)
}

/// POST /api/v1/sessions/:sid/logout
///
/// Participations and points stay with the session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    dispatch(&state, &session_id, Command::Logout).await.map(Json)
}

/// Apply a command to a session and snapshot the result
pub(crate) async fn dispatch(
    state: &AppState,
    session_id: &str,
    command: Command,
) -> ApiResult<ActionResponse> {
    let action = command.name();

    let response = state
        .registry
        .with_session(session_id, |store| {
            store
                .apply(command)
                .map(|outcome| ActionResponse::new(outcome, store.snapshot()))
        })
        .await??;

    tracing::debug!(
        session_id = %session_id,
        action,
        changed = response.changed,
        "Applied session command"
    );

    Ok(response)
}
