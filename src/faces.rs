//! Cross-library face index.
//!
//! Maps each person's name to the photos they appear in. One name has one
//! entry for the whole run, whichever library the photos come from. A name
//! tagged twice in the same photo is recorded once (first rectangle wins);
//! the same name in different photos is recorded per photo.
//!
//! Entries are kept in a `BTreeMap`, so the manifest lists faces sorted by
//! name (case-sensitive, byte order).

use crate::catalog::{Coordinates, Face};
use crate::timestamp::friendly_date;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// One appearance of a face in a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSighting {
    pub id: u64,
    pub coordinates: Coordinates,
}

/// Everything recorded for one name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEntry {
    /// Face key of the first sighting.
    pub key: i64,
    pub photos: Vec<FaceSighting>,
}

#[derive(Debug, Clone, Default)]
pub struct FaceIndex {
    entries: BTreeMap<String, FaceEntry>,
}

impl FaceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from entries recorded elsewhere.
    pub fn seeded(entries: BTreeMap<String, FaceEntry>) -> Self {
        Self { entries }
    }

    /// Record `name` in photo `photo_id`. Returns `false` if the name was
    /// already recorded for that photo.
    pub fn record(&mut self, photo_id: u64, name: &str, key: i64, coordinates: Coordinates) -> bool {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| FaceEntry {
                key,
                photos: Vec::new(),
            });
        if entry.photos.iter().any(|s| s.id == photo_id) {
            return false;
        }
        entry.photos.push(FaceSighting {
            id: photo_id,
            coordinates,
        });
        true
    }

    /// Record every named face of a photo and return the names in first-seen
    /// order, without duplicates. Unnamed faces are logged and skipped.
    pub fn record_photo(
        &mut self,
        photo_id: u64,
        faces: &[Face<'_>],
        caption: &str,
        captured: NaiveDateTime,
    ) -> Vec<String> {
        let mut names = Vec::new();
        for face in faces {
            match face.name() {
                Some(name) => {
                    if self.record(photo_id, name, face.key(), face.coordinates()) {
                        names.push(name.to_string());
                    }
                }
                None => warn!(
                    face_key = face.key(),
                    "no name for face #{} in photo {} ({})",
                    face.key(),
                    caption,
                    friendly_date(captured.date())
                ),
            }
        }
        names
    }

    pub fn get(&self, name: &str) -> Option<&FaceEntry> {
        self.entries.get(name)
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FaceEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
