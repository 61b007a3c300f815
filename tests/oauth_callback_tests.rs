// SPDX-License-Identifier: MIT

//! OAuth authorize and callback flow tests.
//!
//! The callback must exchange the code exactly once, resolve the Reddit
//! username, report the labelled token pair to core in the background,
//! and redirect the browser without waiting on that report.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_authorize_redirects_to_consent_screen() {
    let reddit = MockServer::start().await;
    let core = MockServer::start().await;

    let (app, _) = common::test_app(&reddit.uri(), &core.uri());

    let response = app.oneshot(get("/v1/user42/authorize")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with(&format!("{}/api/v1/authorize?", reddit.uri())));
    assert!(location.contains("client_id=test_client_id"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("state=user42"));
    assert!(location.contains("duration=permanent"));
}

#[tokio::test]
async fn test_callback_exchanges_code_reports_and_redirects() {
    let reddit = MockServer::start().await;
    let core = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": "history identity mysubreddits read",
            "refresh_token": "ref"
        })))
        .expect(1)
        .mount(&reddit)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "snoo" })))
        .expect(1)
        .mount(&reddit)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/users/user42/authorize/reddit"))
        .and(body_string_contains("\"username\":\"snoo\""))
        .and(body_string_contains("\"token\":\"tok\""))
        .and(body_string_contains("\"refresh-token\":\"ref\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&core)
        .await;

    let (app, config) = common::test_app(&reddit.uri(), &core.uri());

    let response = app
        .oneshot(get("/v1/authorize_callback?code=abc123&state=user42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, format!("{}/settings", config.frontend_url));

    // The report runs detached from the redirect; give it time to land
    // before the mock servers verify their expectations on drop.
    tokio::time::sleep(Duration::from_millis(250)).await;
}

#[tokio::test]
async fn test_callback_with_oauth_error_redirects_with_reason() {
    let reddit = MockServer::start().await;
    let core = MockServer::start().await;

    // No token exchange may happen when Reddit reported an error
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&reddit)
        .await;

    let (app, config) = common::test_app(&reddit.uri(), &core.uri());

    let response = app
        .oneshot(get(
            "/v1/authorize_callback?error=access_denied&state=user42",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        location,
        format!("{}/settings?error=access_denied", config.frontend_url)
    );
}

#[tokio::test]
async fn test_callback_missing_code_redirects_with_reason() {
    let reddit = MockServer::start().await;
    let core = MockServer::start().await;

    let (app, config) = common::test_app(&reddit.uri(), &core.uri());

    let response = app
        .oneshot(get("/v1/authorize_callback?state=user42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        location,
        format!(
            "{}/settings?error=missing_code_or_state",
            config.frontend_url
        )
    );
}

#[tokio::test]
async fn test_callback_failed_exchange_surfaces_500() {
    let reddit = MockServer::start().await;
    let core = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&reddit)
        .await;

    let (app, _) = common::test_app(&reddit.uri(), &core.uri());

    let response = app
        .oneshot(get("/v1/authorize_callback?code=abc123&state=user42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
