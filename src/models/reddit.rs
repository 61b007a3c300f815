// SPDX-License-Identifier: MIT

//! Raw Reddit API schemas, deserialized as-is from upstream responses.

use serde::Deserialize;

/// Response from Reddit's token endpoint (both the code exchange and
/// the refresh grant). `refresh_token` is absent when the grant was not
/// requested with `duration=permanent`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Response from `GET /api/v1/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    #[serde(rename = "name")]
    pub username: String,
}

/// A single media variant with its pixel dimensions.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSource {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A resolution ladder: the full-size source plus downscaled variants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaVariant {
    #[serde(default)]
    pub source: Option<MediaSource>,
    #[serde(default)]
    pub resolutions: Vec<MediaSource>,
}

/// The animated variants Reddit offers alongside the static image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Variants {
    #[serde(default)]
    pub gif: Option<MediaVariant>,
    #[serde(default)]
    pub mp4: Option<MediaVariant>,
}

/// One image entry in a post's preview structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub source: Option<MediaSource>,
    #[serde(default)]
    pub resolutions: Vec<MediaSource>,
    #[serde(default)]
    pub variants: Variants,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

/// One listing entry as Reddit returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Site-relative permalink, e.g. `/r/rust/comments/...`.
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub preview: Preview,
    #[serde(default)]
    pub score: i64,
    /// Seconds since epoch, fractional.
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub is_video: bool,
    /// Raw self-text HTML, entity-escaped and wrapped in sentinel comments.
    #[serde(default)]
    pub selftext_html: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingChild {
    pub data: RawPost,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    /// Opaque pagination cursor; absent or empty on the last page.
    #[serde(default)]
    pub after: Option<String>,
}

/// Listing envelope from Reddit's feed endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub kind: String,
    pub data: ListingData,
}
