//! Core data models for basm

mod config;
mod entry;
mod shell;
mod target;

pub use config::{ConfigFile, PathsConfig, ToolsConfig};
pub use entry::{Entry, EntryType};
pub use shell::ShellType;
pub use target::Target;
