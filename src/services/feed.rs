// SPDX-License-Identifier: MIT

//! Feed fetch pipeline: issue the listing request, transparently
//! refresh an expired token once, and normalize Reddit's post schema
//! into the platform's generic post model.

use crate::error::AppError;
use crate::models::post::{FeedResponse, Post, TokenPair, PLATFORM};
use crate::models::reddit::{Listing, MediaSource, MediaVariant, PreviewImage, RawPost};
use crate::services::core::CoreReporter;
use crate::services::reddit::RedditClient;
use chrono::DateTime;
use reqwest::StatusCode;

/// Hero images and videos are picked to sit as close to this width as
/// possible, preferring the first variant at or above it.
const TARGET_IMAGE_WIDTH: u32 = 600;

/// Reddit wraps self-text HTML in these escaped sentinel comments.
const SELFTEXT_PREFIX: &str = "&lt;!-- SC_OFF --&gt;";
const SELFTEXT_SUFFIX: &str = "&lt;!-- SC_ON --&gt;";

const SITE_ROOT: &str = "https://reddit.com";

/// One normalized page of the feed.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    /// Opaque cursor from the upstream "after" field; `None` when the
    /// listing reports no further results.
    pub next_cursor: Option<String>,
    /// Caller-facing "next page" URL back to this service's own fetch
    /// endpoint; empty when there is no next page.
    pub next_url: String,
}

impl From<FeedPage> for FeedResponse {
    fn from(page: FeedPage) -> Self {
        FeedResponse {
            posts: page.posts,
            next_url: page.next_url,
        }
    }
}

/// Fetches listing pages and normalizes them.
#[derive(Clone)]
pub struct FeedService {
    reddit: RedditClient,
    reporter: CoreReporter,
    self_url: String,
}

impl FeedService {
    pub fn new(reddit: RedditClient, reporter: CoreReporter, self_url: String) -> Self {
        Self {
            reddit,
            reporter,
            self_url,
        }
    }

    /// Produce one page of the feed for the given token pair.
    ///
    /// A 401 is recovered exactly once, and only when both tokens were
    /// supplied: refresh, report the new pair to core in the background,
    /// reissue the request with the new access token. A second 401 is a
    /// terminal upstream error. An empty access token routes to the
    /// public listing and never refreshes.
    pub async fn fetch_page(
        &self,
        auth: &TokenPair,
        scope: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<FeedPage, AppError> {
        let access_token = match auth.bearer_token.is_empty() {
            true => None,
            false => Some(auth.bearer_token.as_str()),
        };

        let mut response = self.reddit.get_listing(access_token, cursor).await?;

        if response.status() == StatusCode::UNAUTHORIZED && auth.can_refresh() {
            tracing::info!("Access token rejected by Reddit, refreshing");
            drop(response);

            let refreshed = self.reddit.refresh_token(&auth.refresh_token).await?;
            self.reporter
                .report(&self.reddit, &refreshed, scope.unwrap_or_default());

            response = self
                .reddit
                .get_listing(Some(&refreshed.bearer_token), cursor)
                .await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(status.as_u16(), body));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))?;

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| normalize(&child.data))
            .collect();

        let next_cursor = listing.data.after.filter(|after| !after.is_empty());
        let next_url = match &next_cursor {
            Some(after) => self.next_page_url(scope, after),
            None => String::new(),
        };

        Ok(FeedPage {
            posts,
            next_cursor,
            next_url,
        })
    }

    /// Build the "next page" URL, matching whichever of the scoped or
    /// unscoped fetch endpoints the original request targeted.
    fn next_page_url(&self, scope: Option<&str>, after: &str) -> String {
        match scope {
            Some(id) if !id.is_empty() => {
                format!("{}/v1/{}/posts?continue={}", self.self_url, id, after)
            }
            _ => format!("{}/v1/posts?continue={}", self.self_url, after),
        }
    }
}

/// Project one raw listing entry into the generic post shape.
fn normalize(post: &RawPost) -> Post {
    let (hero_img, video) = match post.preview.images.first() {
        Some(image) => (best_image(image), best_video(image)),
        None => (String::new(), String::new()),
    };

    Post {
        id: post.id.clone(),
        date: DateTime::from_timestamp(post.created_utc as i64, 0)
            .unwrap_or(DateTime::UNIX_EPOCH),
        author: post.author.clone(),
        title: html_escape::decode_html_entities(&post.title).into_owned(),
        hero_img,
        video,
        is_video: post.is_video,
        post_link: format!("{}{}", SITE_ROOT, post.permalink),
        platform: PLATFORM.to_string(),
        url: post.url.clone(),
        score: post.score,
        subreddit: post.subreddit.clone(),
        content: post
            .selftext_html
            .as_deref()
            .map(content_html)
            .unwrap_or_default(),
    }
}

/// Pick the best hero image: the animated GIF ladder wins when it has
/// anything, otherwise the static ladder.
fn best_image(image: &PreviewImage) -> String {
    let from_gif = match &image.variants.gif {
        Some(gif) => best_resolution(ladder(gif)),
        None => "",
    };

    let best = match from_gif.is_empty() {
        true => best_resolution(
            image
                .resolutions
                .iter()
                .map(Some)
                .chain(std::iter::once(image.source.as_ref())),
        ),
        false => from_gif,
    };

    html_escape::decode_html_entities(best).into_owned()
}

/// Pick the best video from the MP4 ladder. Videos never fall back to
/// static images.
fn best_video(image: &PreviewImage) -> String {
    let best = match &image.variants.mp4 {
        Some(mp4) => best_resolution(ladder(mp4)),
        None => "",
    };

    html_escape::decode_html_entities(best).into_owned()
}

fn ladder(variant: &MediaVariant) -> impl Iterator<Item = Option<&MediaSource>> {
    variant
        .resolutions
        .iter()
        .map(Some)
        .chain(std::iter::once(variant.source.as_ref()))
}

/// Choose the candidate width closest to the target from above when any
/// candidate meets or exceeds it, otherwise the largest width below.
/// Absent candidates are skipped; ties go to the first seen.
fn best_resolution<'a>(
    candidates: impl IntoIterator<Item = Option<&'a MediaSource>>,
) -> &'a str {
    let mut best_url = "";
    let mut best_width = 0u32;

    for candidate in candidates.into_iter().flatten() {
        let closer_above = candidate.width >= TARGET_IMAGE_WIDTH
            && (best_width < TARGET_IMAGE_WIDTH || candidate.width < best_width);
        let larger_below = best_width < TARGET_IMAGE_WIDTH && candidate.width > best_width;

        if closer_above || larger_below {
            best_url = &candidate.url;
            best_width = candidate.width;
        }
    }

    best_url
}

/// Strip the fixed-length sentinel markers around a self-text body and
/// unescape the remaining HTML entities. Input too short to hold the
/// markers yields an empty string.
fn content_html(content: &str) -> String {
    if content.len() < SELFTEXT_PREFIX.len() + SELFTEXT_SUFFIX.len() {
        return String::new();
    }

    content
        .get(SELFTEXT_PREFIX.len()..content.len() - SELFTEXT_SUFFIX.len())
        .map(|inner| html_escape::decode_html_entities(inner).into_owned())
        .unwrap_or_default()
}
