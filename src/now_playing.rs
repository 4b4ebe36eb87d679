//! Now-playing pipeline behind `GET /api/lastfm`
//!
//! Fetches the latest track from Last.fm and keeps the last good answer on
//! disk. When Last.fm is down, returns garbage, or has nothing to show, the
//! cached answer is served instead.

use log::{error, info, warn};

use crate::cache::CacheManager;
use crate::config::LastfmConfig;
use crate::error::{Result, SiteError};
use crate::lastfm::{LastfmClient, TrackData};

/// Cache key holding the last good track
pub const CACHE_KEY: &str = "lastfm.json";

/// Where a served track came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NowPlaying {
    /// Fetched from Last.fm during this request
    Fresh(TrackData),
    /// Read from the cache because the fetch failed
    Stale(TrackData),
}

impl NowPlaying {
    pub fn into_track(self) -> TrackData {
        match self {
            NowPlaying::Fresh(track) | NowPlaying::Stale(track) => track,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, NowPlaying::Stale(_))
    }
}

/// Serves the most recent track with cache fallback
#[derive(Debug, Clone)]
pub struct NowPlayingService {
    config: LastfmConfig,
    client: LastfmClient,
    cache: CacheManager,
}

impl NowPlayingService {
    pub fn new(config: LastfmConfig, client: LastfmClient, cache: CacheManager) -> Self {
        Self {
            config,
            client,
            cache,
        }
    }

    pub fn config(&self) -> &LastfmConfig {
        &self.config
    }

    /// Handles one request
    ///
    /// # Returns
    /// * `Ok(NowPlaying::Fresh)` - fetched now and written to the cache
    /// * `Ok(NowPlaying::Stale)` - fetch failed, cached value returned
    /// * `Err(SiteError::Configuration)` - credentials missing; nothing attempted
    /// * `Err(SiteError::Unavailable)` - fetch failed and nothing is cached
    pub async fn handle(&self) -> Result<NowPlaying> {
        let credentials = self.config.credentials()?;

        let fetched = self
            .client
            .fetch_latest_track(&credentials)
            .await
            .and_then(|track| track.ok_or(SiteError::NoData));

        match fetched {
            Ok(track) => {
                if let Err(e) = self.cache.write(CACHE_KEY, &track).await {
                    warn!("Failed to update Last.fm cache: {}", e);
                }
                info!("Fetched now playing: {} - {}", track.artist, track.name);
                Ok(NowPlaying::Fresh(track))
            }
            Err(e) => {
                error!("Last.fm API error: {}", e);
                self.fallback().await
            }
        }
    }

    async fn fallback(&self) -> Result<NowPlaying> {
        match self.cache.read::<TrackData>(CACHE_KEY).await {
            Some(track) => {
                warn!("Returning cached Last.fm data due to API failure");
                Ok(NowPlaying::Stale(track))
            }
            None => Err(SiteError::Unavailable),
        }
    }
}
