//! Media tools: re-encoding and thumbnails.
//!
//! | Backend | Thumbnail | Re-encode |
//! |---|---|---|
//! | [`CommandTool`] | external command | external command |
//! | [`BuiltinTool`] | `image` crate, Lanczos3 | external command |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable)
//! - **Backend**: the [`MediaTool`] trait and [`ToolError`]
//! - **Command**: [`CommandTemplate`] rendering and [`CommandTool`]
//! - **Rust backend**: [`BuiltinTool`]

pub mod backend;
mod calculations;
pub mod command;
pub mod rust_backend;

pub use backend::{MediaTool, ToolError};
pub use calculations::fit_within;
pub use command::{CommandTemplate, CommandTool};
pub use rust_backend::BuiltinTool;
