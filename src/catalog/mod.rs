//! Read-only access to a photo library package.
//!
//! A library package is a directory holding `AlbumData.xml` (a property list
//! describing albums and the master photo list) and, optionally, a SQLite
//! `Faces.db` that maps face keys to names.
//!
//! ```text
//! iPhoto Library/
//! ├── AlbumData.xml            # albums, photos, face rectangles
//! ├── Database/apdb/Faces.db   # face key → name (older layouts: Database/Faces.db)
//! └── Masters/…                # original image files
//! ```
//!
//! [`Library`] owns the parsed [`CatalogData`]; [`Album`], [`Photo`] and
//! [`Face`] are cheap borrowed views over it. Face names are only looked up
//! when [`Face::name`] is first called.

mod album_data;
mod faces;

pub use album_data::{ALBUM_DATA, load_catalog, read_album_data};
pub use faces::{FaceNameLookup, SqliteFaceNames};

use crate::cache::CatalogCache;
use crate::timestamp::CaptureOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Album type of the albums the exporter treats as events.
pub const EVENT_ALBUM: &str = "Event";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a photo library (missing AlbumData.xml): {0}")]
    NotALibrary(PathBuf),
    #[error("Could not parse AlbumData.xml: {0}")]
    Plist(#[from] plist::Error),
}

/// Parsed contents of `AlbumData.xml`.
///
/// Field names follow the property list keys so the same struct deserializes
/// straight from the plist and round-trips through the parse cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    /// Location of the library when the plist was written.
    #[serde(rename = "Archive Path", default)]
    pub archive_path: String,
    #[serde(rename = "List of Albums", default)]
    pub albums: Vec<AlbumData>,
    /// Photos keyed by their catalog key.
    #[serde(rename = "Master Image List", default)]
    pub photos: BTreeMap<String, PhotoData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumData {
    #[serde(rename = "AlbumId", default)]
    pub id: i64,
    #[serde(rename = "AlbumName", default)]
    pub name: String,
    /// e.g. "Event", "Regular", "Flagged"
    #[serde(rename = "Album Type", default)]
    pub kind: String,
    #[serde(rename = "KeyList", default)]
    pub photo_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoData {
    #[serde(rename = "Caption", default)]
    pub caption: String,
    #[serde(rename = "Comment", default)]
    pub comment: String,
    #[serde(rename = "ImagePath", default)]
    pub image_path: String,
    #[serde(rename = "DateAsTimerInterval", default)]
    pub date: CaptureOffset,
    #[serde(rename = "Faces", default)]
    pub faces: Vec<FaceData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceData {
    #[serde(rename = "face key", default)]
    pub key: i64,
    /// `{{x, y}, {w, h}}`
    #[serde(default)]
    pub rectangle: String,
}

/// Face rectangle: lower-left corner and size, as fractions of the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<[f64; 4]> for Coordinates {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<Coordinates> for [f64; 4] {
    fn from(c: Coordinates) -> Self {
        [c.x, c.y, c.width, c.height]
    }
}

static RECTANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{\{([^,{}]+), ([^,{}]+)\}, \{([^,{}]+), ([^,{}]+)\}\}$")
        .expect("rectangle pattern must compile")
});

impl Coordinates {
    /// Parse the catalog's `{{x, y}, {w, h}}` notation. Every component must
    /// be a finite number.
    pub fn parse(rectangle: &str) -> Option<Self> {
        let caps = RECTANGLE.captures(rectangle.trim())?;
        let mut values = [0.0; 4];
        for (slot, i) in values.iter_mut().zip(1..=4) {
            *slot = caps[i]
                .trim()
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())?;
        }
        Some(values.into())
    }
}

/// An opened photo library.
pub struct Library {
    root: PathBuf,
    data: CatalogData,
    faces: Box<dyn FaceNameLookup>,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("root", &self.root)
            .field("albums", &self.data.albums.len())
            .field("photos", &self.data.photos.len())
            .finish()
    }
}

impl Library {
    /// Open a library package from disk, consulting `cache` before parsing
    /// the property list.
    pub fn open(path: &Path, cache: &dyn CatalogCache) -> Result<Self, CatalogError> {
        Self::check(path)?;
        let root = path.canonicalize()?;
        let data = load_catalog(&root, cache)?;
        Ok(Self::new(&root, data, Box::new(SqliteFaceNames::new(&root))))
    }

    /// Fail unless `path` looks like a library package.
    pub fn check(path: &Path) -> Result<(), CatalogError> {
        if !path.is_dir() || !path.join(ALBUM_DATA).is_file() {
            return Err(CatalogError::NotALibrary(path.to_path_buf()));
        }
        Ok(())
    }

    pub fn new(
        root: impl Into<PathBuf>,
        data: CatalogData,
        faces: Box<dyn FaceNameLookup>,
    ) -> Self {
        Self {
            root: root.into(),
            data,
            faces,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    /// All albums of the given type, in catalog order.
    pub fn albums_of_type(&self, kind: &str) -> Vec<Album<'_>> {
        self.data
            .albums
            .iter()
            .filter(|a| a.kind == kind)
            .map(|data| Album {
                library: self,
                data,
            })
            .collect()
    }

    pub fn photo(&self, key: &str) -> Option<Photo<'_>> {
        let (key, data) = self.data.photos.get_key_value(key)?;
        Some(Photo {
            library: self,
            key,
            data,
        })
    }

    /// Look up a face name. Empty names count as missing.
    pub fn face_name(&self, key: i64) -> Option<String> {
        self.faces.face_name(key).filter(|n| !n.trim().is_empty())
    }

    /// Map a path recorded in the plist to where the file lives now.
    ///
    /// The plist records absolute paths under the library's location at
    /// write time (`Archive Path`). Libraries get moved, so that prefix is
    /// swapped for the directory the library was opened from.
    fn rewrite_path(&self, recorded: &str) -> PathBuf {
        let recorded = Path::new(recorded);
        let archive_dir = Path::new(&self.data.archive_path).parent();
        let current_dir = self.root.parent().unwrap_or(&self.root);
        match archive_dir.map(|dir| recorded.strip_prefix(dir)) {
            Some(Ok(rest)) if !self.data.archive_path.is_empty() => current_dir.join(rest),
            _ => recorded.to_path_buf(),
        }
    }
}

/// A borrowed view of one album.
#[derive(Debug, Clone, Copy)]
pub struct Album<'a> {
    library: &'a Library,
    data: &'a AlbumData,
}

impl<'a> Album<'a> {
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    /// Photos in album order. Keys missing from the master list are skipped.
    pub fn photos(&self) -> Vec<Photo<'a>> {
        self.data
            .photo_keys
            .iter()
            .filter_map(|key| self.library.photo(key))
            .collect()
    }
}

/// A borrowed view of one photo.
#[derive(Debug, Clone, Copy)]
pub struct Photo<'a> {
    library: &'a Library,
    key: &'a str,
    data: &'a PhotoData,
}

impl<'a> Photo<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Usually the original filename, sometimes a user-entered title.
    pub fn caption(&self) -> &'a str {
        &self.data.caption
    }

    pub fn description(&self) -> &'a str {
        &self.data.comment
    }

    pub fn original_path(&self) -> PathBuf {
        self.library.rewrite_path(&self.data.image_path)
    }

    pub fn capture_offset(&self) -> CaptureOffset {
        self.data.date
    }

    pub fn faces(&self) -> Vec<Face<'a>> {
        self.data
            .faces
            .iter()
            .map(|face| Face {
                library: self.library,
                key: face.key,
                coordinates: Coordinates::parse(&face.rectangle).unwrap_or_default(),
                name: OnceCell::new(),
            })
            .collect()
    }
}

/// A face tagged in a photo. The name is resolved on first access.
#[derive(Debug)]
pub struct Face<'a> {
    library: &'a Library,
    key: i64,
    coordinates: Coordinates,
    name: OnceCell<Option<String>>,
}

impl Face<'_> {
    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .get_or_init(|| self.library.face_name(self.key))
            .as_deref()
    }
}
