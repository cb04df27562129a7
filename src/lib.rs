//! # photodisc
//!
//! Exports iPhoto-style photo libraries into a self-contained, static photo
//! disc: plain folders of originals and thumbnails plus a single data file
//! that a bundled HTML viewer reads to browse events, photos and faces
//! without a server.
//!
//! # Architecture: One Sequential Run
//!
//! ```text
//! AlbumData.xml + Faces.db  →  catalog   (parse, resolve names)
//!                           →  sequence  (order, filter, number)
//!                           →  naming    (claim folders, build filenames)
//!                           →  materialize (copy, thumbnail, re-encode, mtime)
//!                           →  faces     (index sightings by name)
//!                           →  manifest  (inc/data.js)
//! ```
//!
//! [`export::ExportRun`] owns everything that must stay consistent across
//! libraries in one run: folder claims, the face index and the ID counters.
//! The whole run is single-threaded; progress is reported over a channel to
//! a printer thread in the binary.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Library opening, `AlbumData.xml` model, face name lookup |
//! | [`cache`] | Optional on-disk cache of parsed catalogs |
//! | [`timestamp`] | Catalog capture offsets → local time, date formatting |
//! | [`metadata`] | Cleanup of event names and photo captions |
//! | [`sequence`] | Event/photo ordering, date-range filter, ID assignment |
//! | [`naming`] | Folder claims and photo filenames |
//! | [`imaging`] | The `MediaTool` port: built-in and external-command backends |
//! | [`materialize`] | Idempotent writing of originals and thumbnails |
//! | [`faces`] | Face index keyed by person name |
//! | [`manifest`] | Streaming writer (and reader) for the viewer's data file |
//! | [`site`] | Copying the viewer template into the output root |
//! | [`export`] | The run orchestrator |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fresh Output Roots Only
//!
//! Folder names are unique within a run, never across runs. `export`
//! therefore refuses an existing output root instead of merging into it;
//! `update-site` is the one command that writes into an existing disc, and
//! it only touches the site assets.
//!
//! ## Existing Files Are Never Rewritten
//!
//! The materializer skips any original or thumbnail already present. An
//! [`export::ExportRun`] driven directly, with its folder claims seeded from
//! a previous run, finishes a partial tree without redoing tool work.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod export;
pub mod faces;
pub mod imaging;
pub mod manifest;
pub mod materialize;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod sequence;
pub mod site;
pub mod timestamp;

#[cfg(test)]
pub(crate) mod test_helpers;
