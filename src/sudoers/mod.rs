//! Validated sudoers changes
//!
//! Every change runs through the same pipeline: the current content is copied
//! to a scratch file, the scratch is edited, the external validator checks it,
//! and only then is it copied over the destination. The scratch file lives in
//! a [`NamedTempFile`], so it is removed on every exit path.

mod tools;

pub use tools::{PrivilegedCopy, Sudo, Validator, Visudo};

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::Settings;
use crate::editor::{self, MatchingLines};
use crate::error::{Error, Result};

/// Pipeline progress, used in diagnostics when a run aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Started,
    Copied,
    Mutated,
    Validated,
    Applied,
}

/// The edit applied to the scratch copy
#[derive(Debug, Clone, Copy)]
pub enum Edit<'a> {
    Append(&'a str),
    RemoveContaining(&'a str),
    Keep,
}

/// Runs sudoers changes against a validator and a privileged copier
pub struct Pipeline<'a> {
    validator: &'a dyn Validator,
    privileged: &'a dyn PrivilegedCopy,
}

impl<'a> Pipeline<'a> {
    pub fn new(validator: &'a dyn Validator, privileged: &'a dyn PrivilegedCopy) -> Self {
        Self {
            validator,
            privileged,
        }
    }

    /// Append an entry, separated from existing content by a blank line
    pub fn add(&self, sudoers: &Path, entry: &str) -> Result<()> {
        self.run(sudoers, sudoers, Edit::Append(entry)).map(|_| ())
    }

    /// Remove every line containing `pattern`; returns the number removed
    pub fn remove(&self, sudoers: &Path, pattern: &str) -> Result<usize> {
        self.run(sudoers, sudoers, Edit::RemoveContaining(pattern))
    }

    /// Validate `source` as-is and install it at `dest`
    pub fn install(&self, source: &Path, dest: &Path) -> Result<()> {
        self.run(source, dest, Edit::Keep).map(|_| ())
    }

    /// Copy `source` to scratch, edit, validate, then apply to `dest`
    ///
    /// On error `dest` is left untouched.
    pub fn run(&self, source: &Path, dest: &Path, edit: Edit<'_>) -> Result<usize> {
        let mut stage = Stage::Started;
        let result = self.run_stages(source, dest, edit, &mut stage);
        if let Err(ref e) = result {
            tracing::debug!(?stage, dest = %dest.display(), error = %e, "sudoers change aborted");
        }
        result
    }

    fn run_stages(
        &self,
        source: &Path,
        dest: &Path,
        edit: Edit<'_>,
        stage: &mut Stage,
    ) -> Result<usize> {
        let scratch = Scratch::copy_from(source)?;
        *stage = Stage::Copied;

        let removed = scratch.apply_edit(edit)?;
        scratch.copy_permissions(source);
        *stage = Stage::Mutated;

        self.validator.validate(scratch.path())?;
        *stage = Stage::Validated;

        self.apply(scratch.path(), dest)?;
        *stage = Stage::Applied;

        tracing::debug!(dest = %dest.display(), "sudoers change applied");
        Ok(removed)
    }

    fn apply(&self, scratch: &Path, dest: &Path) -> Result<()> {
        if Settings::is_system_sudoers(dest) {
            return self.privileged.copy(scratch, dest);
        }
        fs::copy(scratch, dest)
            .map(|_| ())
            .map_err(|e| Error::Apply {
                src: scratch.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

/// Lines of the sudoers file that are neither blank nor comments
pub fn list(sudoers: &Path) -> Result<MatchingLines> {
    editor::non_comment_lines(sudoers)
}

/// Scratch copy of a sudoers file; deleted when dropped
struct Scratch {
    file: NamedTempFile,
}

impl Scratch {
    fn copy_from(source: &Path) -> Result<Self> {
        let content = fs::read(source).map_err(|e| Error::path(source, e))?;
        let mut file = tempfile::Builder::new()
            .prefix("sudoers_")
            .tempfile()
            .map_err(|e| Error::path(std::env::temp_dir(), e))?;
        file.write_all(&content)
            .map_err(|e| Error::path(file.path(), e))?;
        tracing::debug!(source = %source.display(), scratch = %file.path().display(), "copied to scratch");
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }

    fn apply_edit(&self, edit: Edit<'_>) -> Result<usize> {
        match edit {
            Edit::Append(entry) => {
                editor::append_raw(self.path(), format!("\n{}\n", entry).as_bytes())?;
                Ok(0)
            }
            Edit::RemoveContaining(pattern) => editor::remove_lines_containing(self.path(), pattern),
            Edit::Keep => Ok(0),
        }
    }

    /// Best effort: the validator may insist on the original mode
    fn copy_permissions(&self, source: &Path) {
        let result = fs::metadata(source)
            .and_then(|meta| fs::set_permissions(self.path(), meta.permissions()));
        if let Err(e) = result {
            tracing::warn!(scratch = %self.path().display(), error = %e, "could not copy permissions");
        }
    }
}
