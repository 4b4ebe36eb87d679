//! Cache manager for persisting the latest good API responses to disk
//!
//! Provides a `CacheManager` that stores one serializable value per key as a
//! pretty-printed JSON file, supporting graceful degradation when upstream APIs
//! are unavailable.

use directories::ProjectDirs;
use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Fallback cache location when no home directory is available
const LOCAL_CACHE_DIR: &str = ".cache/sitekit";

/// Makes temp file names unique across concurrent writes in this process
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Manages reading and writing cached data to disk
///
/// Each key maps to exactly one file (`<cache_dir>/<key>`) holding the latest
/// value written for it. There is no expiry and no history: a write replaces
/// the previous value, and a read returns whatever is there.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/sitekit/` on Linux, or the equivalent path on other platforms.
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "sitekit")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Platform cache directory, or `./.cache/sitekit` when there is none
    pub fn new_or_local() -> Self {
        Self::new().unwrap_or_else(|| Self::with_dir(PathBuf::from(LOCAL_CACHE_DIR)))
    }

    /// Directory this manager reads from and writes to
    pub fn dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    /// Writes `data` under `key`, replacing any previous value
    ///
    /// The directory is created if missing. The JSON is written to a sibling
    /// temp file owned by this call and renamed into place, so a concurrent
    /// `read` sees either the old value or a complete new one, and concurrent
    /// writers never share a temp file. The last rename wins.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, serialization or file writing fails
    pub async fn write<T: Serialize>(&self, key: &str, data: &T) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;

        let path = self.cache_path(key);
        let temp_path = self.cache_dir.join(format!(
            "{}.{}.{}.tmp",
            key,
            process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let result = write_then_rename(&temp_path, &path, json.as_bytes()).await;
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }

    /// Reads the value stored under `key`
    ///
    /// Returns `None` if the entry doesn't exist, can't be read, or doesn't
    /// parse as `T`. Those cases are only told apart in the logs; callers treat
    /// them all as "nothing cached".
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.cache_path(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache entry at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await
}
