//! External command backend.
//!
//! Both operations are described by a [`CommandTemplate`]: an argument vector
//! whose elements may contain `{input}`, `{output}` and `{size}`. A template
//! is rendered per call and run to completion with stdout and stderr
//! discarded. A non-zero exit is a [`ToolError::Exit`].
//!
//! ```toml
//! [tools]
//! thumbnail = ["sips", "-Z", "{size}", "{input}", "--out", "{output}"]
//! reencode = ["jpegrescan", "{input}", "{output}"]
//! ```
//!
//! Re-encoding is in place: `{input}` and `{output}` both render to the same
//! path, so the tool must support overwriting its input.

use super::backend::{MediaTool, ToolError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// An argument vector with `{input}`, `{output}` and `{size}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTemplate(pub Vec<String>);

/// Values substituted into a [`CommandTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct Placeholders<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub size: Option<u32>,
}

impl CommandTemplate {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Render the arguments (program excluded).
    ///
    /// An argument that is exactly a path placeholder is passed through as
    /// the raw path, so non-UTF-8 paths survive. Placeholders embedded in a
    /// longer argument are substituted as text.
    pub fn render_args(&self, values: &Placeholders<'_>) -> Vec<OsString> {
        let size = values.size.map(|s| s.to_string()).unwrap_or_default();
        self.0
            .iter()
            .skip(1)
            .map(|arg| match arg.as_str() {
                "{input}" => values.input.as_os_str().to_owned(),
                "{output}" => values.output.as_os_str().to_owned(),
                _ => arg
                    .replace("{input}", &values.input.to_string_lossy())
                    .replace("{output}", &values.output.to_string_lossy())
                    .replace("{size}", &size)
                    .into(),
            })
            .collect()
    }

    /// Run the rendered command and wait for it.
    pub fn run(&self, values: &Placeholders<'_>) -> Result<(), ToolError> {
        let program = self.program().ok_or(ToolError::NotConfigured("tool"))?;
        let args = self.render_args(values);
        debug!(program, ?args, "running tool");
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(ToolError::Exit {
                program: program.to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// Runs both operations as external commands.
#[derive(Debug, Clone)]
pub struct CommandTool {
    pub thumbnail: CommandTemplate,
    pub reencode: CommandTemplate,
}

impl CommandTool {
    pub fn new(thumbnail: CommandTemplate, reencode: CommandTemplate) -> Self {
        Self {
            thumbnail,
            reencode,
        }
    }
}

/// Re-encode through `template`, in place.
pub(crate) fn reencode_with(template: &CommandTemplate, path: &Path) -> Result<(), ToolError> {
    if template.is_empty() {
        return Err(ToolError::NotConfigured("reencode"));
    }
    template.run(&Placeholders {
        input: path,
        output: path,
        size: None,
    })
}

impl MediaTool for CommandTool {
    fn reencode(&self, path: &Path) -> Result<(), ToolError> {
        reencode_with(&self.reencode, path)
    }

    fn thumbnail(&self, source: &Path, output: &Path, max_dim: u32) -> Result<(), ToolError> {
        if self.thumbnail.is_empty() {
            return Err(ToolError::NotConfigured("thumbnail"));
        }
        self.thumbnail.run(&Placeholders {
            input: source,
            output,
            size: Some(max_dim),
        })
    }
}
