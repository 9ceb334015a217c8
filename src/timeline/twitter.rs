//! Twitter v1.1 timeline client.
//!
//! Uses application-only authentication: either a configured bearer token,
//! or one obtained by exchanging the consumer key and secret at
//! `/oauth2/token`. The async [`TwitterApi`] does the HTTP work;
//! [`BlockingTimeline`] drives it from the synchronous sync engine.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};

use super::client::TimelineClient;
use super::types::{Post, TimelineQuery};

const USER_TIMELINE_PATH: &str = "/1.1/statuses/user_timeline.json";
const TOKEN_PATH: &str = "/oauth2/token";

/// Async client for the `user_timeline` endpoint.
pub struct TwitterApi {
    client: reqwest::Client,
    api_base: String,
    bearer_token: String,
}

/// `/oauth2/token` response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

impl TwitterApi {
    /// Create a client that authenticates with an existing bearer token.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn with_bearer_token(
        api_base: &str,
        bearer_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tua/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        })
    }

    /// Create an authenticated client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `Config` if no usable credentials are configured and `Auth`
    /// if the token exchange is rejected.
    pub async fn connect(config: &Config) -> Result<Self> {
        match config.credentials()? {
            Credentials::Bearer(token) => {
                debug!("Using configured bearer token");
                Self::with_bearer_token(config.api_base(), token, config.timeout())
            }
            Credentials::Consumer { key, secret } => {
                let mut api =
                    Self::with_bearer_token(config.api_base(), String::new(), config.timeout())?;
                api.bearer_token = api.request_bearer_token(&key, &secret).await?;
                info!("Obtained application bearer token");
                Ok(api)
            }
        }
    }

    async fn request_bearer_token(&self, key: &str, secret: &str) -> Result<String> {
        let url = format!("{}{TOKEN_PATH}", self.api_base);

        let response = self
            .client
            .post(&url)
            .basic_auth(key, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Auth(format!("Token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth(format!("HTTP {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Auth(format!("Failed to parse token response: {e}")))?;

        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(Error::Auth(format!(
                "Unexpected token type `{}`",
                token.token_type
            )));
        }

        Ok(token.access_token)
    }

    /// Fetch one page of a user's timeline.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` on transport failure, a non-2xx status, or a body
    /// that is not an array of posts.
    pub async fn user_timeline(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        let url = format!("{}{USER_TIMELINE_PATH}", self.api_base);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&query.params())
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Timeline request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Fetch(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Malformed timeline response: {e}")))
    }
}

/// Blocking adapter that owns a runtime for [`TwitterApi`].
pub struct BlockingTimeline {
    api: TwitterApi,
    runtime: tokio::runtime::Runtime,
}

impl BlockingTimeline {
    /// Authenticate and wrap the client for blocking use.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot start or authentication fails.
    pub fn connect(config: &Config) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let api = runtime.block_on(TwitterApi::connect(config))?;
        Ok(Self { api, runtime })
    }
}

impl TimelineClient for BlockingTimeline {
    fn fetch_page(&self, query: &TimelineQuery<'_>) -> Result<Vec<Post>> {
        self.runtime.block_on(self.api.user_timeline(query))
    }
}
