// SPDX-License-Identifier: MIT

//! Reddit OAuth authorization routes.

use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

const SETTINGS_ENDPOINT: &str = "/settings";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/authorize", get(authorize_unscoped))
        .route("/v1/{user_id}/authorize", get(authorize))
        .route("/v1/authorize_callback", get(authorize_callback))
}

/// axum's Redirect helpers emit 307/308; the contract with the frontend
/// predates those codes, so build 301/302 responses directly.
fn redirect(status: StatusCode, location: &str) -> Response {
    (status, [(header::LOCATION, location.to_string())]).into_response()
}

/// Send the browser to Reddit's consent screen.
/// GET /v1/{userID}/authorize
async fn authorize(State(state): State<Arc<AppState>>, Path(user_id): Path<String>) -> Response {
    let consent_url = state.reddit.authorize_url(&user_id);

    tracing::info!(user_id = %user_id, "Starting OAuth flow, redirecting to Reddit");

    redirect(StatusCode::FOUND, &consent_url)
}

/// Consent redirect without a user id; the OAuth state goes out empty.
/// GET /v1/authorize
async fn authorize_unscoped(State(state): State<Arc<AppState>>) -> Response {
    let consent_url = state.reddit.authorize_url("");
    redirect(StatusCode::FOUND, &consent_url)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: exchange the code for tokens, report them to core in
/// the background, and send the browser back to the frontend.
/// GET /v1/authorize_callback
///
/// `state` is the user id we sent out in `authorize`; it is passed to
/// core unverified.
async fn authorize_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<Response> {
    let settings_url = format!("{}{}", state.config.frontend_url, SETTINGS_ENDPOINT);

    // "error" is set by Reddit when the user declined (or the request
    // was malformed). Send the browser back with the reason instead of
    // leaving it on a blank page.
    if let Some(error) = params.error.filter(|e| !e.is_empty()) {
        tracing::warn!(error = %error, "Did not receive authorization from Reddit");
        let location = format!("{}?error={}", settings_url, urlencoding::encode(&error));
        return Ok(redirect(StatusCode::FOUND, &location));
    }

    let (code, user_id) = match (params.code, params.state) {
        (Some(code), Some(user_id)) if !code.is_empty() && !user_id.is_empty() => (code, user_id),
        _ => {
            tracing::warn!("OAuth callback missing code or state");
            let location = format!("{}?error=missing_code_or_state", settings_url);
            return Ok(redirect(StatusCode::FOUND, &location));
        }
    };

    tracing::info!(user_id = %user_id, "Exchanging authorization code for tokens");

    let tokens = state.reddit.exchange_code(&code).await?;

    // Report to core in the background; the redirect must not wait on it.
    state.reporter.report(&state.reddit, &tokens, &user_id);

    Ok(redirect(StatusCode::MOVED_PERMANENTLY, &settings_url))
}
