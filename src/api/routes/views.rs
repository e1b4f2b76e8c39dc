//! View Routes
//!
//! - GET /api/v1/sessions/:sid/views/:tab?difficulty= - Render a tab
//!
//! Tabs: catalog, my-participation, suggest.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::challenges::parse_filter;
use crate::api::dto::ChallengeListParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::view::{self, Tab, View};

/// GET /api/v1/sessions/:sid/views/:tab
pub async fn render_view(
    State(state): State<Arc<AppState>>,
    Path((session_id, tab)): Path<(String, String)>,
    Query(params): Query<ChallengeListParams>,
) -> ApiResult<Json<View>> {
    let tab: Tab = tab.parse()?;
    let filter = parse_filter(params.difficulty.as_deref())?;

    let rendered = state
        .registry
        .with_session(&session_id, |store| view::render(store, tab, filter))
        .await??;

    Ok(Json(rendered))
}
