// SPDX-License-Identifier: MIT

//! Fire-and-forget reporting of token pairs to the core platform.
//!
//! The report resolves the Reddit username for the token, then POSTs
//! the labelled pair to core's user-storage API. It runs as a detached
//! task: failure is logged and dropped, never surfaced to the request
//! that spawned it.

use crate::error::AppError;
use crate::models::post::TokenPair;
use crate::services::reddit::RedditClient;

/// Reporter for the core platform's user-storage API.
#[derive(Clone)]
pub struct CoreReporter {
    http: reqwest::Client,
    core_url: String,
}

impl CoreReporter {
    pub fn new(http: reqwest::Client, core_url: String) -> Self {
        Self { http, core_url }
    }

    /// Spawn a background task that reports `auth` for `user_id`.
    ///
    /// Everything the task needs is cloned up front so the caller's
    /// response path keeps nothing the task depends on.
    pub fn report(&self, reddit: &RedditClient, auth: &TokenPair, user_id: &str) {
        let reporter = self.clone();
        let reddit = reddit.clone();
        let auth = auth.clone();
        let user_id = user_id.to_string();

        tokio::spawn(async move {
            if let Err(e) = reporter.send(&reddit, &auth, &user_id).await {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    "Failed to report Reddit tokens to core"
                );
            }
        });
    }

    async fn send(
        &self,
        reddit: &RedditClient,
        auth: &TokenPair,
        user_id: &str,
    ) -> Result<(), AppError> {
        let username = reddit.get_identity(&auth.bearer_token).await?;

        tracing::info!(user_id = %user_id, username = %username, "Storing Reddit account in core");

        let body = serde_json::json!({
            "type": "reddit",
            "username": username,
            "token": auth.bearer_token,
            "refresh-token": auth.refresh_token,
        });

        let response = self
            .http
            .post(format!(
                "{}/v1/users/{}/authorize/reddit",
                self.core_url, user_id
            ))
            .json(&body)
            .send()
            .await
            .map_err(AppError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(status.as_u16(), body));
        }

        Ok(())
    }
}
