// SPDX-License-Identifier: MIT

//! Reddit API client: OAuth token grants, identity lookup and listing
//! requests.
//!
//! Every operation here is a single round trip with no retry; the
//! one-shot refresh-and-retry policy lives in the feed service.

use crate::error::AppError;
use crate::models::post::TokenPair;
use crate::models::reddit::{Identity, TokenResponse};
use reqwest::header;

/// Required by the Reddit API terms and conditions on every request.
const USER_AGENT: &str = "web:icedmocha:v0.0.1 (by /u/icedmoch)";

/// Scopes requested on the consent screen - see Reddit OAuth docs.
const API_SCOPE: &str = "history identity mysubreddits read";

const ACCESS_TOKEN_ENDPOINT: &str = "/api/v1/access_token";
const AUTHORIZE_ENDPOINT: &str = "/api/v1/authorize";
const IDENTITY_ENDPOINT: &str = "/api/v1/me";

/// Reddit API client with OAuth client credentials.
#[derive(Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    /// Base URL for the public site (token endpoint, consent screen,
    /// unauthenticated listings).
    www_url: String,
    /// Base URL for the authenticated API (listings, identity).
    oauth_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl RedditClient {
    /// Create a client against the production Reddit endpoints.
    pub fn new(
        http: reqwest::Client,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        Self::with_base_urls(
            http,
            client_id,
            client_secret,
            redirect_uri,
            "https://www.reddit.com".to_string(),
            "https://oauth.reddit.com".to_string(),
        )
    }

    /// Create a client against custom base URLs (used by tests to point
    /// at a mock server).
    pub fn with_base_urls(
        http: reqwest::Client,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        www_url: String,
        oauth_url: String,
    ) -> Self {
        Self {
            http,
            www_url,
            oauth_url,
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    /// Build the consent-screen URL the browser is redirected to.
    ///
    /// `state` is the caller-supplied user id, passed through verbatim
    /// and never verified on callback. Known anti-CSRF gap; core keys
    /// its storage POST on this value.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}{}?client_id={}&response_type=code&state={}&redirect_uri={}&duration=permanent&scope={}",
            self.www_url,
            AUTHORIZE_ENDPOINT,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(state),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(API_SCOPE),
        )
    }

    /// Exchange a single-use authorization code for a token pair.
    ///
    /// The redirect URI must exactly match the one used to obtain the
    /// code. Reddit only grants a refresh token for `duration=permanent`
    /// authorizations, so it may come back absent.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AppError> {
        let response = self
            .http
            .post(format!("{}{}", self.www_url, ACCESS_TOKEN_ENDPOINT))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(header::USER_AGENT, USER_AGENT)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(AppError::transport)?;

        let token: TokenResponse = Self::decode_response(response).await?;

        Ok(TokenPair {
            bearer_token: token.access_token,
            refresh_token: token.refresh_token.unwrap_or_default(),
        })
    }

    /// Trade a refresh token for a fresh access token.
    ///
    /// Reddit does not rotate refresh tokens, so the new access token is
    /// paired with the same refresh token we were given.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let response = self
            .http
            .post(format!("{}{}", self.www_url, ACCESS_TOKEN_ENDPOINT))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(header::USER_AGENT, USER_AGENT)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(AppError::transport)?;

        let token: TokenResponse = Self::decode_response(response).await?;

        Ok(TokenPair {
            bearer_token: token.access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    /// Resolve the Reddit username behind an access token.
    pub async fn get_identity(&self, access_token: &str) -> Result<String, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.oauth_url, IDENTITY_ENDPOINT))
            .bearer_auth(access_token)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(AppError::transport)?;

        let identity: Identity = Self::decode_response(response).await?;

        tracing::debug!(username = %identity.username, "Resolved Reddit identity");
        Ok(identity.username)
    }

    /// Request one page of the listing feed.
    ///
    /// Routes to the authenticated API when an access token is present,
    /// otherwise to the public JSON listing. Returns the raw response so
    /// the caller can decide how to handle a 401.
    pub async fn get_listing(
        &self,
        access_token: Option<&str>,
        cursor: Option<&str>,
    ) -> Result<reqwest::Response, AppError> {
        let mut request = match access_token {
            Some(token) => self
                .http
                .get(format!("{}/", self.oauth_url))
                .bearer_auth(token),
            None => self.http.get(format!("{}/.json", self.www_url)),
        };
        request = request.header(header::USER_AGENT, USER_AGENT);

        if let Some(after) = cursor {
            request = request.query(&[("after", after)]);
        }

        request.send().await.map_err(AppError::transport)
    }

    /// Check status and parse the JSON body.
    async fn decode_response<T: for<'de> serde::Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}
