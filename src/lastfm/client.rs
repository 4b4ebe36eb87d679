//! Last.fm API client
//!
//! Fetches the most recent scrobble for an account via `user.getRecentTracks`.

use reqwest::header::USER_AGENT;
use reqwest::Client;

use super::types::{extract_track_data, RecentTracksResponse, TrackData};
use crate::config::Credentials;
use crate::error::{Result, SiteError};

/// Base URL for the Last.fm API
pub const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

const CLIENT_USER_AGENT: &str = concat!("sitekit/", env!("CARGO_PKG_VERSION"));

/// Client for fetching listening history from the Last.fm API
#[derive(Debug, Clone)]
pub struct LastfmClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for LastfmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LastfmClient {
    /// Create a new LastfmClient pointing at the public API
    pub fn new() -> Self {
        Self::with_base_url(LASTFM_API_URL)
    }

    /// Create a new LastfmClient with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the single most recent track for the configured account
    ///
    /// # Returns
    /// * `Ok(RecentTracksResponse)` - the parsed response
    /// * `Err(SiteError::Upstream)` - non-success HTTP status
    /// * `Err(SiteError::SchemaValidation)` - body didn't match the expected shape
    /// * `Err(SiteError::Request)` - the request itself failed
    pub async fn fetch_recent_tracks(
        &self,
        credentials: &Credentials,
    ) -> Result<RecentTracksResponse> {
        let params = [
            ("method", "user.getRecentTracks"),
            ("user", credentials.username.as_str()),
            ("api_key", credentials.api_key.as_str()),
            ("format", "json"),
            ("limit", "1"),
        ];

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Upstream {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let parsed: RecentTracksResponse = serde_json::from_str(&text)?;
        Ok(parsed)
    }

    /// Fetch and normalize the most recent track
    ///
    /// `Ok(None)` means the account has no scrobbles.
    pub async fn fetch_latest_track(&self, credentials: &Credentials) -> Result<Option<TrackData>> {
        let response = self.fetch_recent_tracks(credentials).await?;
        extract_track_data(&response)
    }
}
