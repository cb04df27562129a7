//! Writing originals and thumbnails into the export tree.
//!
//! Each photo produces two artifacts, handled independently:
//!
//! | Artifact | Steps (only if the file does not exist yet) |
//! |---|---|
//! | original | copy source → re-encode (optional) → set mtime |
//! | thumbnail | tool thumbnail from source → re-encode (optional) → set mtime |
//!
//! An artifact that already exists is left alone: no copy, no tool call, no
//! new mtime. Running the export again over a finished tree does nothing.
//!
//! ## Failures
//!
//! Copy and tool failures are logged and the photo moves on, unless the
//! materializer is strict, in which case they are returned as
//! [`MaterializeError`]. A failed mtime stamp is only ever logged.

use crate::imaging::{MediaTool, ToolError};
use chrono::{DateTime, Utc};
use filetime::FileTime;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Could not copy {} to {}: {error}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("{step} failed for {}: {error}", .path.display())]
    Tool {
        step: &'static str,
        path: PathBuf,
        #[source]
        error: ToolError,
    },
}

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// Already on disk; untouched.
    Existing,
    Created,
    /// Written, but a best-effort step (re-encode) failed.
    Incomplete,
    /// Not written.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOutcome {
    pub original: ArtifactStatus,
    pub thumbnail: ArtifactStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Run the lossless re-encoder on every written file.
    pub reencode: bool,
    /// Longer edge of thumbnails.
    pub thumbnail_size: u32,
    /// Turn copy and tool failures into errors.
    pub strict: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            reencode: false,
            thumbnail_size: 300,
            strict: false,
        }
    }
}

/// One photo to materialize.
#[derive(Debug, Clone, Copy)]
pub struct PhotoJob<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub thumbnail: &'a Path,
    /// Modification time for both artifacts.
    pub modified: DateTime<Utc>,
}

pub struct Materializer<T: MediaTool> {
    tool: T,
    options: MaterializeOptions,
}

impl<T: MediaTool> Materializer<T> {
    pub fn new(tool: T, options: MaterializeOptions) -> Self {
        Self { tool, options }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn materialize(&self, job: &PhotoJob<'_>) -> Result<MaterializeOutcome, MaterializeError> {
        Ok(MaterializeOutcome {
            original: self.original(job)?,
            thumbnail: self.thumbnail(job)?,
        })
    }

    fn original(&self, job: &PhotoJob<'_>) -> Result<ArtifactStatus, MaterializeError> {
        if job.destination.exists() {
            return Ok(ArtifactStatus::Existing);
        }
        if let Err(error) = std::fs::copy(job.source, job.destination) {
            return self.failed(MaterializeError::Copy {
                from: job.source.to_path_buf(),
                to: job.destination.to_path_buf(),
                error,
            });
        }
        self.finish(job.destination, job.modified)
    }

    fn thumbnail(&self, job: &PhotoJob<'_>) -> Result<ArtifactStatus, MaterializeError> {
        if job.thumbnail.exists() {
            return Ok(ArtifactStatus::Existing);
        }
        if let Err(error) =
            self.tool
                .thumbnail(job.source, job.thumbnail, self.options.thumbnail_size)
        {
            return self.failed(MaterializeError::Tool {
                step: "thumbnail",
                path: job.thumbnail.to_path_buf(),
                error,
            });
        }
        self.finish(job.thumbnail, job.modified)
    }

    /// Re-encode and stamp a freshly written file.
    fn finish(&self, path: &Path, modified: DateTime<Utc>) -> Result<ArtifactStatus, MaterializeError> {
        let mut status = ArtifactStatus::Created;
        if self.options.reencode {
            if let Err(error) = self.tool.reencode(path) {
                let err = MaterializeError::Tool {
                    step: "reencode",
                    path: path.to_path_buf(),
                    error,
                };
                if self.options.strict {
                    return Err(err);
                }
                warn!("{err}");
                status = ArtifactStatus::Incomplete;
            }
        }
        stamp(path, modified);
        Ok(status)
    }

    fn failed(&self, err: MaterializeError) -> Result<ArtifactStatus, MaterializeError> {
        if self.options.strict {
            return Err(err);
        }
        warn!("{err}");
        Ok(ArtifactStatus::Failed)
    }
}

/// Set the modification time of `path`. Failures are logged.
fn stamp(path: &Path, modified: DateTime<Utc>) {
    let time = FileTime::from_unix_time(modified.timestamp(), 0);
    match filetime::set_file_mtime(path, time) {
        Ok(()) => debug!(path = %path.display(), %modified, "stamped"),
        Err(e) => warn!(path = %path.display(), "could not set modification time: {e}"),
    }
}
