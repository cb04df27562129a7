//! Media tool trait and shared error type.
//!
//! The [`MediaTool`] trait covers the two operations the exporter delegates:
//! lossless re-encoding of a file in place and thumbnail generation.
//!
//! Implementations:
//! - [`CommandTool`](super::command::CommandTool): runs external
//!   executables from configurable command templates.
//! - [`BuiltinTool`](super::rust_backend::BuiltinTool): resizes in-process
//!   with the `image` crate; re-encoding still goes through a command.
//!
//! Callers get every failure back as a [`ToolError`]. Whether a failure is
//! fatal is the caller's decision, not the tool's.

use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("No {0} command configured")]
    NotConfigured(&'static str),
}

/// Media operations the materializer delegates.
pub trait MediaTool {
    /// Re-encode `path` losslessly, in place.
    fn reencode(&self, path: &Path) -> Result<(), ToolError>;

    /// Write a copy of `source` to `output`, scaled so neither edge exceeds
    /// `max_dim`.
    fn thumbnail(&self, source: &Path, output: &Path, max_dim: u32) -> Result<(), ToolError>;
}

impl<T: MediaTool + ?Sized> MediaTool for &T {
    fn reencode(&self, path: &Path) -> Result<(), ToolError> {
        (**self).reencode(path)
    }

    fn thumbnail(&self, source: &Path, output: &Path, max_dim: u32) -> Result<(), ToolError> {
        (**self).thumbnail(source, output, max_dim)
    }
}

impl<T: MediaTool + ?Sized> MediaTool for Box<T> {
    fn reencode(&self, path: &Path) -> Result<(), ToolError> {
        (**self).reencode(path)
    }

    fn thumbnail(&self, source: &Path, output: &Path, max_dim: u32) -> Result<(), ToolError> {
        (**self).thumbnail(source, output, max_dim)
    }
}
