//! Comment Routes
//!
//! - GET /api/v1/sessions/:sid/challenges/:id/comments - List comments
//! - POST /api/v1/sessions/:sid/challenges/:id/comments - Add a comment

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::sessions::dispatch;
use crate::api::dto::{ActionResponse, CommentListResponse, CommentRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::{ChallengeId, Command};
use crate::view::CommentLine;

/// GET /api/v1/sessions/:sid/challenges/:id/comments
///
/// Comments in the order they were written, dates formatted
/// "YYYY-MM-DD HH:MM".
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, ChallengeId)>, PathRejection>,
) -> ApiResult<Json<CommentListResponse>> {
    let Path((session_id, challenge_id)) = path?;
    let comments: Vec<CommentLine> = state
        .registry
        .with_session(&session_id, |store| {
            store
                .comments(challenge_id)
                .iter()
                .map(CommentLine::from)
                .collect()
        })
        .await?;

    Ok(Json(CommentListResponse {
        challenge_id,
        total: comments.len(),
        comments,
    }))
}

/// POST /api/v1/sessions/:sid/challenges/:id/comments
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, ChallengeId)>, PathRejection>,
    body: Result<Json<CommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ActionResponse>)> {
    let Path((session_id, challenge_id)) = path?;
    let Json(req) = body?;
    let command = Command::Comment {
        challenge_id,
        text: req.text,
    };
    let response = dispatch(&state, &session_id, command).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
