//! Application configuration loaded from environment variables.
//!
//! Everything the service needs to talk to Reddit and the core platform
//! is required at startup; a missing variable halts the process before
//! it serves traffic.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reddit OAuth client ID (public).
    pub reddit_client_id: String,
    /// Reddit OAuth client secret.
    pub reddit_client_secret: String,
    /// OAuth redirect URI, must exactly match the one registered on Reddit.
    pub redirect_uri: String,
    /// Base URL of the core platform (stores per-user credentials).
    pub core_url: String,
    /// Frontend URL for post-authorization redirects.
    pub frontend_url: String,
    /// Externally reachable base URL of this service, used to build
    /// "next page" links back to our own fetch endpoints.
    pub self_url: String,
    /// Server port.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            reddit_client_id: require("REDDIT_CLIENT_ID")?,
            reddit_client_secret: require("REDDIT_CLIENT_SECRET")?,
            redirect_uri: require("REDIRECT_URI")?,
            core_url: require("CORE_URL")?,
            frontend_url: require("FRONTEND_URL")?,
            self_url: require("SELF_URL")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            reddit_client_id: "test_client_id".to_string(),
            reddit_client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:3001/v1/authorize_callback".to_string(),
            core_url: "http://localhost:4000".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            self_url: "http://localhost:3001".to_string(),
            port: 3001,
        }
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
