//! CLI output formatting for export runs.
//!
//! # Information-First Display
//!
//! Every entity (library, event, photo) is shown by its identity first: the
//! event by its ID and folder, the photo by its position and title. File
//! names and artifact status follow as indented context lines.
//!
//! # Output Format
//!
//! ```text
//! Library /Volumes/Archive/iPhoto Library (2 events)
//! 001 2013-04-01 - Trip to the lake (2 photos)
//!     001 Pier
//!         File: 2013-04-01 09-12-44 - 1 - Pier.jpg
//!         original: created
//!         thumbnail: created
//!     002 (2013-04-01 10-03-10 - 2.jpg)
//!         original: existing
//!         thumbnail: existing
//! Manifest → disc/inc/data.js
//!
//! Exported 2 events, 2 photos, 1 face from 1 library
//!     Files: 2 created, 2 existing, 0 failed
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::export::{ExportEvent, ExportSummary};
use crate::materialize::ArtifactStatus;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: index + title, with a photo count.
///
/// ```text
/// 001 2013-04-01 - Trip to the lake (2 photos)
/// ```
fn entity_header(index: usize, title: &str, count: usize) -> String {
    format!("{} {} ({})", format_index(index), title, plural(count, "photo", "photos"))
}

/// Format a photo line: titled photos show the title, untitled ones the
/// filename in parens.
///
/// ```text
/// 001 Pier                              // titled
/// 002 (2013-04-01 10-03-10 - 2.jpg)     // untitled, filename IS the identity
/// ```
fn image_line(index: usize, title: &str, filename: &str) -> String {
    if title.is_empty() {
        format!("{} ({})", format_index(index), filename)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

fn status_label(status: ArtifactStatus) -> &'static str {
    match status {
        ArtifactStatus::Existing => "existing",
        ArtifactStatus::Created => "created",
        ArtifactStatus::Incomplete => "incomplete",
        ArtifactStatus::Failed => "failed",
    }
}

/// `1 photo`, `2 photos`. `many` is the plural form.
fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Progress events
// ============================================================================

/// Format a single export progress event as display lines.
pub fn format_export_event(event: &ExportEvent) -> Vec<String> {
    match event {
        ExportEvent::LibraryOpened { path, events } => {
            vec![format!(
                "Library {} ({})",
                path.display(),
                plural(*events, "event", "events")
            )]
        }
        ExportEvent::EventStarted {
            id,
            folder,
            photo_count,
        } => vec![entity_header(*id as usize, folder, *photo_count)],
        ExportEvent::PhotoExported {
            seq,
            title,
            filename,
            outcome,
        } => {
            let photo_indent = indent(1);
            let detail_indent = indent(2);
            let mut lines = vec![format!(
                "{}{}",
                photo_indent,
                image_line(*seq, title, filename)
            )];
            if !title.is_empty() {
                lines.push(format!("{}File: {}", detail_indent, filename));
            }
            lines.push(format!(
                "{}original: {}",
                detail_indent,
                status_label(outcome.original)
            ));
            lines.push(format!(
                "{}thumbnail: {}",
                detail_indent,
                status_label(outcome.thumbnail)
            ));
            lines
        }
        ExportEvent::ManifestWritten { path } => {
            vec![format!("Manifest \u{2192} {}", path.display())]
        }
    }
}

// ============================================================================
// Summaries
// ============================================================================

/// Format the closing summary of an export run.
pub fn format_export_summary(summary: &ExportSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Exported {}, {}, {} from {}",
            plural(summary.events, "event", "events"),
            plural(summary.photos, "photo", "photos"),
            plural(summary.faces, "face", "faces"),
            plural(summary.libraries, "library", "libraries"),
        ),
        format!(
            "{}Files: {} created, {} existing, {} failed",
            indent(1),
            summary.created,
            summary.existing,
            summary.failed
        ),
    ];
    if summary.assets > 0 {
        lines.push(format!(
            "{}Site: {}",
            indent(1),
            plural(summary.assets, "asset", "assets")
        ));
    }
    lines
}

/// Print the closing summary of an export run to stdout.
pub fn print_export_summary(summary: &ExportSummary) {
    for line in format_export_summary(summary) {
        println!("{}", line);
    }
}

/// Format the result of `update-site`.
pub fn format_update_site(copied: usize) -> Vec<String> {
    vec![format!("Updated site: {} copied", plural(copied, "asset", "assets"))]
}

pub fn print_update_site(copied: usize) {
    for line in format_update_site(copied) {
        println!("{}", line);
    }
}
