//! Error types for sitekit
//!
//! Covers configuration, upstream API, schema validation and server failures.
//! Only `Configuration` and `Unavailable` are ever shown to HTTP clients; the
//! rest are absorbed by the cache fallback in the now-playing pipeline.

use thiserror::Error;
use warp::http::StatusCode;

#[derive(Debug, Error)]
pub enum SiteError {
    /// API key or username missing
    #[error("Last.fm API credentials not configured")]
    Configuration,

    /// Upstream answered with a non-success status
    #[error("Last.fm API error: HTTP {status}")]
    Upstream { status: u16 },

    /// Upstream body or normalized track didn't match the expected shape
    #[error("Schema validation failed: {0}")]
    SchemaValidation(#[from] serde_json::Error),

    /// Transport-level failure talking to upstream
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned an empty track list
    #[error("No track data found in Last.fm response")]
    NoData,

    /// Both upstream and cache came up empty
    #[error("Failed to fetch Last.fm data and no cached data available")]
    Unavailable,

    #[error("Server error: {0}")]
    Server(#[from] warp::Error),
}

impl SiteError {
    /// HTTP status reported to clients for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::Configuration | SiteError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            SiteError::Upstream { .. }
            | SiteError::SchemaValidation(_)
            | SiteError::Request(_)
            | SiteError::NoData => StatusCode::BAD_GATEWAY,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_status_codes() {
        assert_eq!(SiteError::Configuration.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(SiteError::Unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(SiteError::NoData.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_error_message_includes_status() {
        let err = SiteError::Upstream { status: 500 };
        assert_eq!(err.to_string(), "Last.fm API error: HTTP 500");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_schema_error_from_serde() {
        let serde_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = SiteError::from(serde_err);
        assert!(matches!(err, SiteError::SchemaValidation(_)));
    }
}
