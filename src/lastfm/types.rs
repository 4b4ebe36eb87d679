//! Last.fm response schema and the normalized `TrackData`
//!
//! The response structs mirror `user.getRecentTracks` JSON. Deserialization is
//! the schema check: a missing field or wrong type fails the parse.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;

/// Image size whose URL becomes the album art
const ALBUM_ART_SIZE: &str = "large";

/// Most recent track, as served to the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackData {
    /// Track title
    pub name: String,
    pub artist: String,
    pub album: String,
    /// Album art URL, empty if Last.fm has none
    pub album_art: String,
    /// Playing right now, as opposed to the last scrobble in history
    pub now_playing: bool,
}

/// Top-level `user.getRecentTracks` response
#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentTracks {
    pub track: Vec<RecentTrack>,
}

/// A single scrobble
#[derive(Debug, Clone, Deserialize)]
pub struct RecentTrack {
    pub name: String,
    pub artist: TextField,
    pub album: TextField,
    pub image: Vec<Image>,
    /// Present only on the currently playing track
    #[serde(rename = "@attr", default)]
    pub attr: Option<TrackAttr>,
}

/// Last.fm wraps plain strings as `{"#text": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct TextField {
    #[serde(rename = "#text")]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub size: String,
    #[serde(rename = "#text")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAttr {
    /// `"true"` when playing; Last.fm encodes booleans as strings
    pub nowplaying: String,
}

impl RecentTrack {
    fn is_now_playing(&self) -> bool {
        self.attr
            .as_ref()
            .is_some_and(|attr| attr.nowplaying == "true")
    }

    fn album_art(&self) -> &str {
        self.image
            .iter()
            .find(|img| img.size == ALBUM_ART_SIZE)
            .map(|img| img.url.as_str())
            .unwrap_or_default()
    }
}

/// Normalizes the first track of a response
///
/// # Returns
/// * `Ok(Some(TrackData))` - the most recent track
/// * `Ok(None)` - the response holds no tracks
/// * `Err(SiteError::SchemaValidation)` - the normalized value failed validation
pub fn extract_track_data(response: &RecentTracksResponse) -> Result<Option<TrackData>> {
    let Some(track) = response.recenttracks.track.first() else {
        return Ok(None);
    };

    // Built as JSON and parsed back so the served shape is checked the same way
    // the upstream shape is.
    let normalized = json!({
        "name": track.name,
        "artist": track.artist.text,
        "album": track.album.text,
        "albumArt": track.album_art(),
        "nowPlaying": track.is_now_playing(),
    });

    let track_data: TrackData = serde_json::from_value(normalized)?;
    Ok(Some(track_data))
}
