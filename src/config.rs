//! Runtime configuration
//!
//! Values come from the command line or environment once at startup and are
//! handed to the components that need them; nothing reads the environment
//! while serving requests.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Result, SiteError};

/// Default address the HTTP server listens on
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Last.fm settings as supplied by the host environment
///
/// Both values may be absent at startup; the now-playing endpoint reports a
/// configuration error per request until they are provided.
#[derive(Clone, Default)]
pub struct LastfmConfig {
    /// Secret API key, never sent to clients
    pub api_key: Option<String>,
    /// Account whose listening history is shown; public
    pub username: Option<String>,
}

/// Validated Last.fm credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub username: String,
}

impl LastfmConfig {
    pub fn new(api_key: Option<String>, username: Option<String>) -> Self {
        Self { api_key, username }
    }

    /// Returns the credentials, or `SiteError::Configuration` if either value
    /// is missing or blank. Values are passed on exactly as configured.
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = non_blank(self.api_key.as_deref()).ok_or(SiteError::Configuration)?;
        let username = non_blank(self.username.as_deref()).ok_or(SiteError::Configuration)?;

        Ok(Credentials {
            api_key: api_key.to_string(),
            username: username.to_string(),
        })
    }

    /// The username if set, for the public client configuration
    pub fn public_username(&self) -> Option<&str> {
        non_blank(self.username.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// Keep the API key out of logs.
impl fmt::Debug for LastfmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastfmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Cache directory override; platform cache dir when `None`
    pub cache_dir: Option<PathBuf>,
}
