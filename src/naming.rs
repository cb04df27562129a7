//! Export folder and photo file naming.
//!
//! Every event gets one folder under `photos/`, named after its date and
//! title, and a mirror folder under `photos/thumbnails/`:
//!
//! ```text
//! photos/
//! ├── 2013-04-01 - Trip to the lake/
//! │   ├── 2013-04-01 09-12-44 - 1 - Pier.jpg
//! │   └── 2013-04-01 10-03-10 - 2.jpg
//! ├── 2019-07-04/                      # untitled event
//! ├── 2019-07-04 - 02/                 # second untitled event that day
//! └── thumbnails/
//!     └── 2013-04-01 - Trip to the lake/
//!         └── thumb_2013-04-01 09-12-44 - 1 - Pier.jpg
//! ```
//!
//! ## Claims
//!
//! Folder names are handed out by [`FolderClaims`]. A name, once claimed, is
//! never given to another event in the same run; a collision is resolved by
//! probing `basis - 02`, `basis - 03`, … Claims are kept in memory only and
//! are not re-derived from what is on disk.
//!
//! ## Sanitizing
//!
//! Titles come from user input and end up in paths. [`sanitize`] turns path
//! separators into dashes and drops everything except letters, digits,
//! spaces and `( ) . , -`.

use crate::timestamp::{filename_stamp, iso_date};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directory below `photos/` that mirrors the event folders with thumbnails.
pub const THUMBNAIL_DIR: &str = "thumbnails";

/// Filename prefix of every thumbnail.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Make a title safe for use in a file or folder name.
///
/// - `"Spring/Break 3"` → `"Spring-Break 3"`
/// - `"Rock: 'n' roll!"` → `"Rock n roll"`
/// - `"Zürich (day 2), part 1.5"` → unchanged
pub fn sanitize(title: &str) -> String {
    title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .filter(|&c| c.is_alphanumeric() || matches!(c, ' ' | '(' | ')' | '.' | ',' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// The preferred folder name for an event: `"date"` or `"date - title"`.
pub fn folder_basis(date: NaiveDate, sanitized_title: &str) -> String {
    if sanitized_title.is_empty() {
        iso_date(date)
    } else {
        format!("{} - {}", iso_date(date), sanitized_title)
    }
}

/// A claimed event folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFolder {
    pub name: String,
}

impl ExportFolder {
    /// Folder for the originals, below `photos_root`.
    pub fn event_dir(&self, photos_root: &Path) -> PathBuf {
        photos_root.join(&self.name)
    }

    /// Folder for the thumbnails, below `photos_root`.
    pub fn thumbnail_dir(&self, photos_root: &Path) -> PathBuf {
        photos_root.join(THUMBNAIL_DIR).join(&self.name)
    }

    /// Manifest path of a photo, relative to `photos/`.
    pub fn photo_path(&self, filename: &str) -> String {
        format!("{}/{}", self.name, filename)
    }

    /// Manifest path of a photo's thumbnail, relative to `photos/`.
    pub fn thumbnail_path(&self, filename: &str) -> String {
        format!(
            "{}/{}/{}{}",
            THUMBNAIL_DIR, self.name, THUMBNAIL_PREFIX, filename
        )
    }
}

/// Folder names claimed so far in this run.
#[derive(Debug, Clone, Default)]
pub struct FolderClaims {
    claimed: HashSet<String>,
}

impl FolderClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from names that are already taken.
    pub fn seeded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            claimed: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Claim a folder for an event. `title` is sanitized here.
    pub fn claim(&mut self, date: NaiveDate, title: &str) -> ExportFolder {
        let basis = folder_basis(date, &sanitize(title));
        ExportFolder {
            name: self.claim_basis(&basis),
        }
    }

    /// Claim `basis` itself, or the first free `basis - NN` from 02 up.
    pub fn claim_basis(&mut self, basis: &str) -> String {
        let name = if self.claimed.contains(basis) {
            (2..)
                .map(|n| format!("{basis} - {n:02}"))
                .find(|candidate| !self.claimed.contains(candidate))
                .unwrap_or_else(|| basis.to_string())
        } else {
            basis.to_string()
        };
        self.claimed.insert(name.clone());
        name
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claimed.contains(name)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Width of the intra-event sequence number: the digit count of the number
/// of photos exported before this event, at least one.
pub fn sequence_width(photos_before: usize) -> usize {
    photos_before.to_string().len()
}

/// Filename of an exported photo:
/// `"<Y-m-d H-M-S> - <seq>[ - <title>][.<ext>]"`.
pub fn photo_filename(
    captured: NaiveDateTime,
    seq: usize,
    width: usize,
    title: &str,
    extension: Option<&str>,
) -> String {
    let mut name = format!("{} - {:0width$}", filename_stamp(captured), seq, width = width);
    let title = sanitize(title);
    if !title.is_empty() {
        name.push_str(" - ");
        name.push_str(&title);
    }
    if let Some(ext) = extension.filter(|e| !e.is_empty()) {
        name.push('.');
        name.push_str(ext);
    }
    name
}
