// SPDX-License-Identifier: MIT

//! Platform-neutral wire models shared with the core platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform tag attached to every normalized post.
pub const PLATFORM: &str = "reddit";

/// Token pair as carried in fetch request bodies and in the report to
/// core. Transient per request; the core platform is the system of
/// record, this service never persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "bearer-token", default)]
    pub bearer_token: String,
    #[serde(rename = "refresh-token", default)]
    pub refresh_token: String,
}

impl TokenPair {
    /// Both tokens present, so an expired bearer token is recoverable.
    pub fn can_refresh(&self) -> bool {
        !self.bearer_token.is_empty() && !self.refresh_token.is_empty()
    }
}

/// A Reddit post projected into the platform's generic post shape.
///
/// `hero_img` and `video` are either empty or fully-qualified upstream
/// media URLs, never page-relative paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub title: String,
    #[serde(rename = "hero-img")]
    pub hero_img: String,
    pub video: String,
    #[serde(rename = "is-video")]
    pub is_video: bool,
    #[serde(rename = "post-link")]
    pub post_link: String,
    pub platform: String,
    pub url: String,
    pub score: i64,
    pub subreddit: String,
    pub content: String,
}

/// Response body for the fetch endpoints. `next_url` is empty when the
/// upstream listing reports no further results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    #[serde(rename = "next-url")]
    pub next_url: String,
}
