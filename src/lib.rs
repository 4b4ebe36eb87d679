//! sitekit library
//!
//! Exposes the read-time estimator, the cache, the Last.fm client and the HTTP
//! routes for the binary and for integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod now_playing;
pub mod read_time;
pub mod server;

pub use error::{Result, SiteError};
