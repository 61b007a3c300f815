// SPDX-License-Identifier: MIT

//! Shared test helpers: an app wired against mock Reddit/core servers.

use axum::{body::Body, http::Request, Router};
use reddit_client::{
    config::Config,
    routes::create_router,
    services::{CoreReporter, FeedService, RedditClient},
    AppState,
};
use serde_json::json;
use std::sync::Arc;

/// Build a router whose Reddit and core base URLs point at mock servers.
#[allow(dead_code)]
pub fn test_app(reddit_url: &str, core_url: &str) -> (Router, Config) {
    let mut config = Config::test_default();
    config.core_url = core_url.to_string();

    let http = reqwest::Client::new();
    let reddit = RedditClient::with_base_urls(
        http.clone(),
        config.reddit_client_id.clone(),
        config.reddit_client_secret.clone(),
        config.redirect_uri.clone(),
        reddit_url.to_string(),
        reddit_url.to_string(),
    );
    let reporter = CoreReporter::new(http, config.core_url.clone());
    let feed = FeedService::new(reddit.clone(), reporter.clone(), config.self_url.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        reddit,
        reporter,
        feed,
    });

    (create_router(state), config)
}

/// A GET request carrying the token pair in the body, as the core
/// platform sends it.
#[allow(dead_code)]
pub fn get_with_tokens(uri: &str, bearer: &str, refresh: &str) -> Request<Body> {
    let body = json!({ "bearer-token": bearer, "refresh-token": refresh });

    Request::builder()
        .method("GET")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A two-entry Reddit listing with the given "after" cursor.
#[allow(dead_code)]
pub fn listing_body(after: Option<&str>) -> serde_json::Value {
    json!({
        "kind": "Listing",
        "data": {
            "children": [
                {
                    "data": {
                        "id": "post1",
                        "author": "snoo",
                        "title": "First &amp; foremost",
                        "url": "https://example.com/one",
                        "permalink": "/r/rust/comments/post1/first/",
                        "subreddit": "rust",
                        "score": 100,
                        "created_utc": 1500000000.0,
                        "is_video": false,
                        "selftext_html": null,
                        "preview": {
                            "images": [{
                                "source": { "url": "https://preview.redd.it/big.jpg", "width": 1920, "height": 1080 },
                                "resolutions": [
                                    { "url": "https://preview.redd.it/small.jpg", "width": 320, "height": 180 },
                                    { "url": "https://preview.redd.it/mid.jpg", "width": 640, "height": 360 }
                                ],
                                "variants": {}
                            }]
                        }
                    }
                },
                {
                    "data": {
                        "id": "post2",
                        "author": "gnar",
                        "title": "Second",
                        "url": "https://example.com/two",
                        "permalink": "/r/rust/comments/post2/second/",
                        "subreddit": "rust",
                        "score": 7,
                        "created_utc": 1500000100.0,
                        "is_video": false
                    }
                }
            ],
            "after": after
        }
    })
}

/// Collect a response body as a JSON value.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
