//! Export configuration.
//!
//! Handles loading, validating, and merging a TOML config file. Stock
//! defaults are the base layer; a user file (`--config`) only needs the keys
//! it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnails]
//! size = 300                    # Longer edge of thumbnails, in pixels
//!
//! [titles]
//! placeholder_prefixes = ["Scan", "PD_"]   # Regexes, anchored at the start
//!
//! [manifest]
//! path = "inc/data.js"          # Relative to the output root
//!
//! [tools]
//! backend = "builtin"           # "builtin" or "command"
//! thumbnail = ["sips", "-Z", "{size}", "{input}", "--out", "{output}"]
//! reencode = ["jpegrescan", "{input}", "{output}"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [thumbnails]
//! size = 240
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{BuiltinTool, CommandTemplate, CommandTool, MediaTool};
use crate::metadata::{DEFAULT_PLACEHOLDER_PREFIXES, TitleFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Export configuration.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub thumbnails: ThumbnailsConfig,
    pub titles: TitlesConfig,
    pub manifest: ManifestConfig,
    pub tools: ToolsConfig,
}

impl ExportConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size must be non-zero".into(),
            ));
        }
        self.title_filter()?;
        let manifest = Path::new(&self.manifest.path);
        if self.manifest.path.is_empty()
            || !manifest
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ConfigError::Validation(
                "manifest.path must be a relative path inside the output root".into(),
            ));
        }
        if self.tools.backend == ToolBackend::Command && self.tools.thumbnail.is_empty() {
            return Err(ConfigError::Validation(
                "tools.thumbnail must name a command when tools.backend = \"command\"".into(),
            ));
        }
        Ok(())
    }

    /// The title filter for `titles.placeholder_prefixes`.
    pub fn title_filter(&self) -> Result<TitleFilter, ConfigError> {
        TitleFilter::new(&self.titles.placeholder_prefixes[..]).map_err(|e| {
            ConfigError::Validation(format!("titles.placeholder_prefixes: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Longer edge of generated thumbnails, in pixels.
    pub size: u32,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self { size: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitlesConfig {
    /// Names starting with one of these patterns are device placeholders.
    pub placeholder_prefixes: Vec<String>,
}

impl Default for TitlesConfig {
    fn default() -> Self {
        Self {
            placeholder_prefixes: DEFAULT_PLACEHOLDER_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Manifest location relative to the output root.
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: "inc/data.js".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolBackend {
    /// Thumbnails in-process, re-encoding via `tools.reencode`.
    #[default]
    Builtin,
    /// Both operations via external commands.
    Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub backend: ToolBackend,
    pub thumbnail: CommandTemplate,
    pub reencode: CommandTemplate,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            backend: ToolBackend::default(),
            thumbnail: CommandTemplate::new(["sips", "-Z", "{size}", "{input}", "--out", "{output}"]),
            reencode: CommandTemplate::new(["jpegrescan", "{input}", "{output}"]),
        }
    }
}

impl ToolsConfig {
    /// Build the configured media tool.
    pub fn media_tool(&self) -> Box<dyn MediaTool> {
        match self.backend {
            ToolBackend::Builtin => Box::new(BuiltinTool::new(self.reencode.clone())),
            ToolBackend::Command => Box::new(CommandTool::new(
                self.thumbnail.clone(),
                self.reencode.clone(),
            )),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ExportConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ExportConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ExportConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the export config: stock defaults, with `file` merged on top when
/// given. A named file that does not exist is an error.
pub fn load_config(file: Option<&Path>) -> Result<ExportConfig, ConfigError> {
    let overlay = file.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photodisc configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass the file to `photodisc export --config <file>`.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Thumbnails
# ---------------------------------------------------------------------------
[thumbnails]
# Longer edge of each thumbnail, in pixels. Smaller images are not upscaled.
size = 300

# ---------------------------------------------------------------------------
# Titles
# ---------------------------------------------------------------------------
[titles]
# Event names and photo captions starting with one of these regular
# expressions are device placeholders and are exported without a title.
# Event names that are just a date ("Feb 3, 1995") are always dropped.
placeholder_prefixes = ["Scan", "PD_"]

# ---------------------------------------------------------------------------
# Manifest
# ---------------------------------------------------------------------------
[manifest]
# Location of the viewer's data file, relative to the output root.
path = "inc/data.js"

# ---------------------------------------------------------------------------
# Media tools
# ---------------------------------------------------------------------------
[tools]
# "builtin": thumbnails are resized in-process (JPEG, PNG, TIFF, WebP).
# "command": thumbnails are made by the `thumbnail` command below.
backend = "builtin"

# Command templates. {input}, {output} and {size} are replaced per call.
thumbnail = ["sips", "-Z", "{size}", "{input}", "--out", "{output}"]

# Lossless re-encoder, used with `export --reencode`. Runs in place:
# {input} and {output} are the same file.
reencode = ["jpegrescan", "{input}", "{output}"]
"##
}
