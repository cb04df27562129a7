//! Loading `AlbumData.xml`, through the parse cache.
//!
//! Parsing the property list is by far the slowest part of opening a large
//! library, so the parsed [`CatalogData`] can be kept in a
//! [`CatalogCache`] keyed by the library path and checked against the
//! plist's modification time.

use super::{CatalogData, CatalogError};
use crate::cache::{CatalogCache, cache_key};
use std::path::Path;
use tracing::{debug, warn};

/// Name of the catalog property list inside a library package.
pub const ALBUM_DATA: &str = "AlbumData.xml";

/// Parse a property list file into [`CatalogData`].
pub fn read_album_data(path: &Path) -> Result<CatalogData, CatalogError> {
    Ok(plist::from_file(path)?)
}

/// Load the catalog of the library at `root`, preferring a fresh cache entry.
///
/// A failure to store the freshly parsed catalog is logged and otherwise
/// ignored: the cache only saves time on the next run.
pub fn load_catalog(root: &Path, cache: &dyn CatalogCache) -> Result<CatalogData, CatalogError> {
    let plist_path = root.join(ALBUM_DATA);
    let key = cache_key(root)?;
    let modified = std::fs::metadata(&plist_path)?.modified()?;

    if let Some(data) = cache.load(&key, modified) {
        debug!(library = %root.display(), "catalog loaded from cache");
        return Ok(data);
    }

    debug!(library = %root.display(), "parsing {ALBUM_DATA}");
    let data = read_album_data(&plist_path)?;
    if let Err(e) = cache.store(&key, &data) {
        warn!(library = %root.display(), "could not cache catalog: {e}");
    }
    Ok(data)
}
