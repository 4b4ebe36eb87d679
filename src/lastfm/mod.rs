//! Last.fm integration
//!
//! Fetches the most recent scrobble for an account and normalizes it into
//! `TrackData`, the shape served to the site.

pub mod client;
pub mod types;

pub use client::{LastfmClient, LASTFM_API_URL};
pub use types::{extract_track_data, RecentTracksResponse, TrackData};
