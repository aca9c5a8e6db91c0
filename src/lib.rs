//! basm - shell RC and sudoers manager
//!
//! Edits alias and export lines in a shell RC file and manages sudoers
//! entries. Sudoers changes are staged in a scratch copy, checked by an
//! external validator and only then applied, so the live file never holds
//! unvalidated content.
//!
//! # Features
//!
//! - Add, list and remove alias/export lines
//! - Add, list and remove sudoers entries with validation
//! - Timestamped backups and latest-snapshot restore

pub mod backup;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod model;
pub mod sudoers;

pub use config::Settings;
pub use error::{Error, Result};
pub use model::{Entry, EntryType, Target};
