//! Challenge Routes
//!
//! Catalog browsing and suggestions.
//!
//! - GET /api/v1/sessions/:sid/challenges?difficulty= - Filtered catalog
//! - POST /api/v1/sessions/:sid/challenges - Suggest a new challenge

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::sessions::dispatch;
use crate::api::dto::{
    ActionResponse, ChallengeListParams, ChallengeListResponse, SuggestRequest,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::{Challenge, Command, Difficulty, DifficultyFilter};

/// GET /api/v1/sessions/:sid/challenges
///
/// List the session's catalog, optionally filtered by difficulty.
pub async fn list_challenges(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Query(params): Query<ChallengeListParams>,
) -> ApiResult<Json<ChallengeListResponse>> {
    let filter = parse_filter(params.difficulty.as_deref())?;

    let challenges: Vec<Challenge> = state
        .registry
        .with_session(&session_id, |store| {
            store.catalog().filter(filter).into_iter().cloned().collect()
        })
        .await?;

    Ok(Json(ChallengeListResponse {
        filter: filter.to_string(),
        total: challenges.len(),
        challenges,
    }))
}

/// POST /api/v1/sessions/:sid/challenges
///
/// Suggest a challenge. It joins this session's catalog under the
/// "recommended" category with randomly assigned points.
pub async fn suggest_challenge(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    body: Result<Json<SuggestRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ActionResponse>)> {
    let Json(req) = body?;
    let difficulty: Difficulty = req.difficulty.parse()?;

    let command = Command::Suggest {
        title: req.title,
        description: req.description,
        difficulty,
        duration: req.duration,
    };
    let response = dispatch(&state, &session_id, command).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Parse the difficulty query parameter; absent means "all"
pub(crate) fn parse_filter(raw: Option<&str>) -> ApiResult<DifficultyFilter> {
    Ok(raw.unwrap_or("all").parse()?)
}
