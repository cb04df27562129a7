//! Shared test utilities for the photodisc test suite.
//!
//! Provides an in-memory catalog builder and writers for on-disk library
//! fixtures (`AlbumData.xml`, `Faces.db`, small JPEGs).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let library = CatalogBuilder::new()
//!     .photo("1", "Pier", 386_467_200.0)
//!     .photo_with_faces("2", "Swim", 386_467_500.0, &[(7, "{{0.1, 0.2}, {0.3, 0.4}}")])
//!     .event("Trip to the lake", &["2", "1"])
//!     .names(&[(7, "Alice")])
//!     .build();
//! ```

use image::{ImageEncoder, RgbImage};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::{
    ALBUM_DATA, AlbumData, CatalogData, EVENT_ALBUM, FaceData, Library, PhotoData,
};
use crate::timestamp::CaptureOffset;

// =========================================================================
// In-memory catalogs
// =========================================================================

/// Builds [`CatalogData`] and [`Library`] values for tests.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    data: CatalogData,
    names: HashMap<i64, String>,
    root: Option<PathBuf>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a photo whose original path is its caption.
    pub fn photo(self, key: &str, caption: &str, offset: f64) -> Self {
        self.photo_with_faces(key, caption, offset, &[])
    }

    /// Add a photo with `(face key, rectangle)` pairs.
    pub fn photo_with_faces(
        mut self,
        key: &str,
        caption: &str,
        offset: f64,
        faces: &[(i64, &str)],
    ) -> Self {
        self.data.photos.insert(
            key.to_string(),
            PhotoData {
                caption: caption.to_string(),
                comment: String::new(),
                image_path: caption.to_string(),
                date: CaptureOffset(offset),
                faces: faces
                    .iter()
                    .map(|&(key, rectangle)| FaceData {
                        key,
                        rectangle: rectangle.to_string(),
                    })
                    .collect(),
            },
        );
        self
    }

    /// Add a photo backed by a real file.
    pub fn photo_file(mut self, key: &str, caption: &str, offset: f64, path: &Path) -> Self {
        self = self.photo(key, caption, offset);
        if let Some(photo) = self.data.photos.get_mut(key) {
            photo.image_path = path.to_string_lossy().to_string();
        }
        self
    }

    /// Set a photo's description.
    pub fn comment(mut self, key: &str, comment: &str) -> Self {
        if let Some(photo) = self.data.photos.get_mut(key) {
            photo.comment = comment.to_string();
        }
        self
    }

    pub fn event(self, name: &str, keys: &[&str]) -> Self {
        self.album(EVENT_ALBUM, name, keys)
    }

    pub fn album(mut self, kind: &str, name: &str, keys: &[&str]) -> Self {
        let id = self.data.albums.len() as i64 + 1;
        self.data.albums.push(AlbumData {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            photo_keys: keys.iter().map(|k| k.to_string()).collect(),
        });
        self
    }

    /// Face names served by the built library.
    pub fn names(mut self, names: &[(i64, &str)]) -> Self {
        self.names.extend(face_names(names));
        self
    }

    pub fn root(mut self, root: &Path) -> Self {
        self.root = Some(root.to_path_buf());
        self
    }

    pub fn data(&self) -> CatalogData {
        self.data.clone()
    }

    pub fn build(self) -> Library {
        let root = self.root.unwrap_or_else(|| PathBuf::from("/lib"));
        Library::new(root, self.data, Box::new(self.names))
    }
}

pub fn face_names(names: &[(i64, &str)]) -> HashMap<i64, String> {
    names
        .iter()
        .map(|&(key, name)| (key, name.to_string()))
        .collect()
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write `data` as `AlbumData.xml` into `dir`.
pub fn write_album_data(dir: &Path, data: &CatalogData) {
    std::fs::create_dir_all(dir).unwrap();
    plist::to_file_xml(dir.join(ALBUM_DATA), data).unwrap();
}

/// Create a `Faces.db` at `path` holding the given names.
pub fn write_faces_db(path: &Path, names: &[(i64, &str)]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let conn = Connection::open(path).unwrap();
    conn.execute_batch("CREATE TABLE RKFaceName (faceKey INTEGER PRIMARY KEY, name TEXT);")
        .unwrap();
    for (key, name) in names {
        conn.execute(
            "INSERT INTO RKFaceName (faceKey, name) VALUES (?1, ?2)",
            rusqlite::params![key, name],
        )
        .unwrap();
    }
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}
