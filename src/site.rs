//! Copying the viewer's static assets into the output root.
//!
//! The template directory (HTML, scripts, styles) is copied verbatim.
//! Directories are created as needed and existing asset files are
//! overwritten, so `update-site` can refresh an exported disc in place.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Site template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("Could not read site template: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Could not copy {}: {error}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// Copy every file below `template` to the same relative path under
/// `output`. Returns the number of files copied.
pub fn copy_site(template: &Path, output: &Path) -> Result<usize, SiteError> {
    if !template.is_dir() {
        return Err(SiteError::TemplateNotFound(template.to_path_buf()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(template).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(template) else {
            continue;
        };
        let target = output.join(relative);
        let result = if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            fs::copy(entry.path(), &target).map(|_| ())
        };
        result.map_err(|error| SiteError::Copy {
            path: target.clone(),
            error,
        })?;
        if entry.file_type().is_file() {
            debug!(asset = %relative.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn template() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("inc/css")).unwrap();
        fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();
        fs::write(tmp.path().join("inc/viewer.js"), "// viewer").unwrap();
        fs::write(tmp.path().join("inc/css/site.css"), "body {}").unwrap();
        tmp
    }

    #[test]
    fn copies_tree_verbatim() {
        let src = template();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("disc");

        let copied = copy_site(src.path(), &dest).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "<html></html>");
        assert_eq!(fs::read_to_string(dest.join("inc/viewer.js")).unwrap(), "// viewer");
        assert!(dest.join("inc/css/site.css").is_file());
    }

    #[test]
    fn overwrites_existing_assets_and_keeps_other_files() {
        let src = template();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(out.path().join("inc")).unwrap();
        fs::write(out.path().join("index.html"), "old").unwrap();
        fs::write(out.path().join("inc/data.js"), "var events = {};").unwrap();

        copy_site(src.path(), out.path()).unwrap();

        assert_eq!(fs::read_to_string(out.path().join("index.html")).unwrap(), "<html></html>");
        assert_eq!(
            fs::read_to_string(out.path().join("inc/data.js")).unwrap(),
            "var events = {};"
        );
    }

    #[test]
    fn missing_template_is_error() {
        let out = TempDir::new().unwrap();
        let result = copy_site(&out.path().join("nope"), out.path());
        assert!(matches!(result, Err(SiteError::TemplateNotFound(_))));
    }
}
