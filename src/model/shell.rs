//! Shell type detection and default RC paths

use std::path::{Path, PathBuf};

/// Shells whose RC file basm knows how to locate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
}

impl ShellType {
    /// Detect shell type from the value of `$SHELL`
    ///
    /// Anything not ending in `zsh` is treated as bash.
    pub fn from_shell_path(shell: &str) -> Self {
        if shell.ends_with("zsh") {
            ShellType::Zsh
        } else {
            ShellType::Bash
        }
    }

    /// RC file name relative to the home directory
    pub fn rc_file_name(&self) -> &'static str {
        match self {
            ShellType::Bash => ".bashrc",
            ShellType::Zsh => ".zshrc",
        }
    }

    /// Get the default RC file path for this shell
    pub fn default_rc_path(&self, home: &Path) -> PathBuf {
        home.join(self.rc_file_name())
    }
}
