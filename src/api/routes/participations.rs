//! Participation Routes
//!
//! - POST /api/v1/sessions/:sid/challenges/:id/participation - Join
//! - DELETE /api/v1/sessions/:sid/challenges/:id/participation - Cancel
//! - GET /api/v1/sessions/:sid/participations - Joined challenges
//! - GET /api/v1/sessions/:sid/report - Participation count per category

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use super::sessions::dispatch;
use crate::api::dto::{ActionResponse, ParticipationListResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::{CategoryBreakdown, ChallengeId, Command};

/// POST /api/v1/sessions/:sid/challenges/:id/participation
///
/// Joining an already joined challenge succeeds with `changed: false`.
pub async fn join_challenge(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, ChallengeId)>, PathRejection>,
) -> ApiResult<Json<ActionResponse>> {
    let Path((session_id, challenge_id)) = path?;
    dispatch(&state, &session_id, Command::Join { challenge_id })
        .await
        .map(Json)
}

/// DELETE /api/v1/sessions/:sid/challenges/:id/participation
pub async fn cancel_participation(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, ChallengeId)>, PathRejection>,
) -> ApiResult<Json<ActionResponse>> {
    let Path((session_id, challenge_id)) = path?;
    dispatch(&state, &session_id, Command::Cancel { challenge_id })
        .await
        .map(Json)
}

/// GET /api/v1/sessions/:sid/participations
pub async fn list_participations(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ParticipationListResponse>> {
    let response = state
        .registry
        .with_session(&session_id, |store| ParticipationListResponse {
            participations: store.participations().to_vec(),
            total_points: store.total_points(),
        })
        .await?;

    Ok(Json(response))
}

/// GET /api/v1/sessions/:sid/report
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<CategoryBreakdown>> {
    let breakdown = state
        .registry
        .with_session(&session_id, |store| store.category_breakdown())
        .await?;

    Ok(Json(breakdown))
}
