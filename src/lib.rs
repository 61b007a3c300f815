// SPDX-License-Identifier: MIT

//! Reddit adapter for the core platform.
//!
//! Drives the OAuth2 authorization-code flow with Reddit, fetches and
//! normalizes post listings into the platform's generic post model, and
//! transparently refreshes expired access tokens. Holds no state of its
//! own: token pairs live only as long as the request that carried them.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{CoreReporter, FeedService, RedditClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub reddit: RedditClient,
    pub reporter: CoreReporter,
    pub feed: FeedService,
}

impl AppState {
    /// Wire up the services around one shared HTTP client.
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        let reddit = RedditClient::new(
            http.clone(),
            config.reddit_client_id.clone(),
            config.reddit_client_secret.clone(),
            config.redirect_uri.clone(),
        );
        let reporter = CoreReporter::new(http, config.core_url.clone());
        let feed = FeedService::new(reddit.clone(), reporter.clone(), config.self_url.clone());

        Self {
            config,
            reddit,
            reporter,
            feed,
        }
    }
}
