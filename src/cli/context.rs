//! Command execution context

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::backup::BackupManager;
use crate::config::Settings;
use crate::editor::MatchingLines;
use crate::sudoers::{Pipeline, Sudo, Visudo};

/// Common context for command execution
pub struct Context {
    pub settings: Settings,
    validator: Visudo,
    privileged: Sudo,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        let validator = Visudo::new(settings.tools.validator.clone());
        let privileged = Sudo::new(settings.tools.privileged_helper.clone());
        Self {
            settings,
            validator,
            privileged,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Settings::from_env()?))
    }

    /// Sudoers pipeline wired to the configured validator and helper
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(&self.validator, &self.privileged)
    }

    /// Get a BackupManager instance
    pub fn backup_manager(&self) -> BackupManager {
        BackupManager::new(&self.settings)
    }

    /// Write each line to stdout exactly as it appears in the file
    pub fn print_lines(&self, lines: MatchingLines) -> Result<()> {
        let mut out = std::io::stdout().lock();
        for line in lines {
            out.write_all(&line?)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print reload hint after modifying the RC file
    pub fn print_reload_hint(&self) {
        let reload_cmd = format!("source {}", self.settings.rc_file.display());
        println!(
            "{} {}",
            "→".cyan(),
            format!("Run '{}' to apply changes", reload_cmd).dimmed()
        );
    }
}
