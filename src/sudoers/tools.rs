//! External programs the sudoers pipeline depends on

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Checks candidate sudoers content before it is applied
pub trait Validator {
    fn validate(&self, path: &Path) -> Result<()>;
}

/// Copies a validated file over a destination that needs elevated rights
pub trait PrivilegedCopy {
    fn copy(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// Runs `<program> -c -f <path>` and captures its combined output
#[derive(Debug, Clone)]
pub struct Visudo {
    program: String,
}

impl Visudo {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Validator for Visudo {
    fn validate(&self, path: &Path) -> Result<()> {
        tracing::debug!(program = %self.program, path = %path.display(), "validating");
        let rejected = |output: String| Error::Validation {
            program: self.program.clone(),
            path: path.to_path_buf(),
            output,
        };

        let output = Command::new(&self.program)
            .arg("-c")
            .arg("-f")
            .arg(path)
            .output()
            .map_err(|e| rejected(format!("failed to run: {}", e)))?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim();
        Err(rejected(if combined.is_empty() {
            output.status.to_string()
        } else {
            combined.to_string()
        }))
    }
}

/// Runs `<helper> cp <src> <dest>` with the caller's terminal attached,
/// so the helper can prompt for credentials
#[derive(Debug, Clone)]
pub struct Sudo {
    helper: String,
}

impl Sudo {
    pub fn new(helper: impl Into<String>) -> Self {
        Self {
            helper: helper.into(),
        }
    }
}

impl PrivilegedCopy for Sudo {
    fn copy(&self, src: &Path, dest: &Path) -> Result<()> {
        tracing::debug!(helper = %self.helper, src = %src.display(), dest = %dest.display(), "privileged copy");
        let failed = |reason: String| Error::Apply {
            src: PathBuf::from(src),
            dest: PathBuf::from(dest),
            reason,
        };

        let status = Command::new(&self.helper)
            .arg("cp")
            .arg(src)
            .arg(dest)
            .status()
            .map_err(|e| failed(format!("failed to run {}: {}", self.helper, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("{} cp {}", self.helper, status)))
        }
    }
}
