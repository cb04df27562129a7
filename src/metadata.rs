//! Event name and photo title cleanup.
//!
//! Catalog names are often not names at all. Two kinds are dropped so they
//! don't end up in folder names, filenames and the viewer:
//!
//! - **Date defaults**: an event nobody renamed is called after its first
//!   photo's date, e.g. `Feb 3, 1995`. The export folder already carries the
//!   date, so the name adds nothing.
//! - **Device placeholders**: scanners and cameras fill in captions such as
//!   `Scan 12` or `PD_0042`. These are matched against a configurable list of
//!   prefix patterns (`titles.placeholder_prefixes`).
//!
//! A dropped name becomes the empty string; everything else is trimmed.

use regex::Regex;
use std::sync::LazyLock;

/// Prefix patterns used when none are configured.
pub const DEFAULT_PLACEHOLDER_PREFIXES: &[&str] = &["Scan", "PD_"];

static DATE_DEFAULT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z]{3} [0-9]{1,2}, [0-9]{4}$").expect("date name pattern must compile")
});

/// Decides which catalog names are real titles.
#[derive(Debug, Clone)]
pub struct TitleFilter {
    placeholders: Vec<Regex>,
}

impl TitleFilter {
    /// Build a filter from prefix patterns. Each pattern is a regular
    /// expression matched at the start of the (trimmed) name.
    pub fn new<S: AsRef<str>>(prefixes: &[S]) -> Result<Self, regex::Error> {
        let placeholders = prefixes
            .iter()
            .map(|p| Regex::new(&format!("^(?:{})", p.as_ref())))
            .collect::<Result<_, _>>()?;
        Ok(Self { placeholders })
    }

    /// Event title to export, or `""` for date defaults and placeholders.
    pub fn event_name(&self, name: &str) -> String {
        let name = name.trim();
        if DATE_DEFAULT_NAME.is_match(name) || self.is_placeholder(name) {
            String::new()
        } else {
            name.to_string()
        }
    }

    /// Photo title to export, or `""` for placeholders.
    pub fn photo_title(&self, caption: &str) -> String {
        let caption = caption.trim();
        if self.is_placeholder(caption) {
            String::new()
        } else {
            caption.to_string()
        }
    }

    fn is_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|re| re.is_match(name))
    }
}

impl Default for TitleFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_PREFIXES).expect("default placeholder patterns must compile")
    }
}
