//! Error types for basm operations

use std::path::{Path, PathBuf};

use crate::model::Target;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the editor, the sudoers pipeline and the backup manager
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot access {}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} rejected {}: {output}", path.display())]
    Validation {
        program: String,
        path: PathBuf,
        output: String,
    },

    #[error("failed to apply {} to {}: {reason}", src.display(), dest.display())]
    Apply {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("no {target} backup found in {}", dir.display())]
    NotFound { target: Target, dir: PathBuf },

    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: &'static str, name: String },

    #[error("failed to parse config at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub fn path(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Path {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
