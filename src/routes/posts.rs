// SPDX-License-Identifier: MIT

//! Feed fetch routes.
//!
//! The core platform calls these with the user's token pair in the
//! request body; this service holds no credentials of its own.

use crate::error::Result;
use crate::models::post::{FeedResponse, TokenPair};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/posts", get(get_posts))
        .route("/v1/{id}/posts", get(get_posts_scoped))
}

/// Pagination query parameters.
#[derive(Deserialize)]
pub struct PageParams {
    /// Opaque cursor from a previous page's "next-url".
    #[serde(rename = "continue", default)]
    cursor: Option<String>,
}

/// Fetch a page of posts. GET /v1/posts
async fn get_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    Json(auth): Json<TokenPair>,
) -> Result<Json<FeedResponse>> {
    fetch(&state, None, params, auth).await
}

/// Fetch a page of posts scoped to a subreddit or user id.
/// GET /v1/{id}/posts
async fn get_posts_scoped(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PageParams>,
    Json(auth): Json<TokenPair>,
) -> Result<Json<FeedResponse>> {
    fetch(&state, Some(id), params, auth).await
}

async fn fetch(
    state: &AppState,
    scope: Option<String>,
    params: PageParams,
    auth: TokenPair,
) -> Result<Json<FeedResponse>> {
    if let Some(cursor) = &params.cursor {
        tracing::debug!(cursor = %cursor, "Received page cursor");
    }

    let page = state
        .feed
        .fetch_page(&auth, scope.as_deref(), params.cursor.as_deref())
        .await?;

    Ok(Json(page.into()))
}
