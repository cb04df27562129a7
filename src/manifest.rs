//! The viewer's data file.
//!
//! The static viewer loads a single script that defines three globals:
//!
//! ```text
//! var events = {
//!     "1": {"id":1,"title":"Trip to the lake","date":"2013-04-01",...}
//! };
//!
//! var photos = {
//!     "1": {"id":1,"path":"2013-04-01 - Trip to the lake/...",...}
//! };
//!
//! var faces = {
//!     "Alice": {"key":4,"photos":[{"id":1,"coordinates":[0.1,0.2,0.3,0.4]}]}
//! };
//! ```
//!
//! [`ManifestWriter`] emits these one member at a time through a buffered
//! writer; a section is never serialized as a whole. [`parse_manifest`]
//! reads the file back, for verification.

use crate::faces::{FaceEntry, FaceIndex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed manifest: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u64,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "dateFriendly")]
    pub date_friendly: String,
    pub photos: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: u64,
    /// Relative to `photos/`.
    pub path: String,
    /// Relative to `photos/`.
    pub thumb_path: String,
    pub event_id: u64,
    pub title: String,
    pub description: String,
    pub faces: Vec<String>,
    pub date: String,
    #[serde(rename = "dateFriendly")]
    pub date_friendly: String,
}

/// A manifest read back from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub events: BTreeMap<u64, EventRecord>,
    pub photos: BTreeMap<u64, PhotoRecord>,
    pub faces: BTreeMap<String, FaceEntry>,
}

/// Streams `var <name> = {...};` sections.
pub struct ManifestWriter<W: Write> {
    out: W,
    members: Option<usize>,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, members: None }
    }

    pub fn begin_section(&mut self, name: &str) -> Result<(), ManifestError> {
        if self.members.is_some() {
            return Err(ManifestError::Malformed(format!(
                "section {name} opened inside another section"
            )));
        }
        write!(self.out, "var {name} = {{")?;
        self.members = Some(0);
        Ok(())
    }

    pub fn member<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), ManifestError> {
        let count = self
            .members
            .as_mut()
            .ok_or_else(|| ManifestError::Malformed("member outside a section".into()))?;
        if *count > 0 {
            self.out.write_all(b",")?;
        }
        *count += 1;
        self.out.write_all(b"\n\t")?;
        serde_json::to_writer(&mut self.out, key)?;
        self.out.write_all(b": ")?;
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    pub fn end_section(&mut self) -> Result<(), ManifestError> {
        match self.members.take() {
            Some(0) => self.out.write_all(b"};\n\n")?,
            Some(_) => self.out.write_all(b"\n};\n\n")?,
            None => return Err(ManifestError::Malformed("no open section".into())),
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W, ManifestError> {
        if self.members.is_some() {
            return Err(ManifestError::Malformed("unterminated section".into()));
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write the manifest to `path`, creating parent directories.
pub fn write_manifest(
    path: &Path,
    events: &[EventRecord],
    photos: &[PhotoRecord],
    faces: &FaceIndex,
) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = ManifestWriter::new(BufWriter::new(fs::File::create(path)?));

    writer.begin_section("events")?;
    for event in events {
        writer.member(&event.id.to_string(), event)?;
    }
    writer.end_section()?;

    writer.begin_section("photos")?;
    for photo in photos {
        writer.member(&photo.id.to_string(), photo)?;
    }
    writer.end_section()?;

    writer.begin_section("faces")?;
    for (name, entry) in faces.entries() {
        writer.member(name, entry)?;
    }
    writer.end_section()?;

    writer.finish()?;
    Ok(())
}

/// Parse a manifest produced by [`write_manifest`].
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let mut rest = content;
    let manifest = Manifest {
        events: parse_section(&mut rest, "events")?,
        photos: parse_section(&mut rest, "photos")?,
        faces: parse_section(&mut rest, "faces")?,
    };
    if !rest.trim().is_empty() {
        return Err(ManifestError::Malformed("trailing content".into()));
    }
    Ok(manifest)
}

pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    parse_manifest(&fs::read_to_string(path)?)
}

fn parse_section<'a, T: DeserializeOwned>(rest: &mut &'a str, name: &str) -> Result<T, ManifestError> {
    let current: &'a str = *rest;
    let body = current
        .trim_start()
        .strip_prefix(&format!("var {name} = "))
        .ok_or_else(|| ManifestError::Malformed(format!("expected `var {name} = `")))?;

    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<T>();
    let value = stream
        .next()
        .ok_or_else(|| ManifestError::Malformed(format!("missing value for {name}")))??;
    let after = body[stream.byte_offset()..].trim_start();

    *rest = after
        .strip_prefix(';')
        .ok_or_else(|| ManifestError::Malformed(format!("missing `;` after {name}")))?;
    Ok(value)
}
