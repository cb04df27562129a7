//! Catalog parse cache.
//!
//! Parsing `AlbumData.xml` for a library with tens of thousands of photos
//! takes long enough to notice on every run. The parsed [`CatalogData`] can
//! be kept between runs behind the [`CatalogCache`] port:
//!
//! - [`NoCache`]: the default; every run parses the plist.
//! - [`JsonFileCache`]: one JSON file per library in a cache directory.
//!
//! # Cache keys
//!
//! The key is the SHA-256 of the library's canonical path ([`cache_key`]),
//! so the same library opened through different relative paths shares one
//! entry, and two libraries never collide.
//!
//! # Freshness
//!
//! `load` takes the plist's modification time. An entry stored before that
//! time is stale and reads as a miss, as do entries written by a different
//! cache format version and entries that fail to parse.

use crate::catalog::CatalogData;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Version of the cache entry format. Bump this to invalidate all
/// existing entries when the format or key computation changes.
const ENTRY_VERSION: u32 = 1;

/// Storage for parsed catalogs.
pub trait CatalogCache {
    /// Return the entry for `key` unless it is older than `freshness`.
    fn load(&self, key: &str, freshness: SystemTime) -> Option<CatalogData>;

    fn store(&self, key: &str, data: &CatalogData) -> io::Result<()>;
}

/// Cache that never hits and never stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl CatalogCache for NoCache {
    fn load(&self, _key: &str, _freshness: SystemTime) -> Option<CatalogData> {
        None
    }

    fn store(&self, _key: &str, _data: &CatalogData) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    version: u32,
    /// Unix seconds at which the entry was written.
    stored_at: u64,
    data: CatalogData,
}

/// Cache entries as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
}

impl JsonFileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CatalogCache for JsonFileCache {
    fn load(&self, key: &str, freshness: SystemTime) -> Option<CatalogData> {
        let content = std::fs::read_to_string(self.entry_path(key)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;
        if entry.version != ENTRY_VERSION || entry.stored_at < unix_seconds(freshness) {
            return None;
        }
        Some(entry.data)
    }

    fn store(&self, key: &str, data: &CatalogData) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            version: ENTRY_VERSION,
            stored_at: unix_seconds(SystemTime::now()),
            data: data.clone(),
        };
        let json = serde_json::to_string(&entry)?;
        std::fs::write(self.entry_path(key), json)
    }
}

fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Cache key for a library: SHA-256 hex of its canonical path.
pub fn cache_key(library: &Path) -> io::Result<String> {
    let canonical = library.canonicalize()?;
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    Ok(format!("{:x}", digest))
}
