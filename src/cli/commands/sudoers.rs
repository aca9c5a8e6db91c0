//! Sudoers commands

use anyhow::{Context as _, Result};

use crate::cli::args::SudoersCommands;
use crate::cli::Context;
use crate::sudoers;

/// Execute a sudoers subcommand
pub fn execute(ctx: &Context, action: &SudoersCommands) -> Result<()> {
    let path = &ctx.settings.sudoers_path;
    match action {
        SudoersCommands::Add { entry } => {
            ctx.pipeline()
                .add(path, entry)
                .context("sudoers entry not added")?;
            ctx.print_success("Sudoers entry added and applied.");
        }
        SudoersCommands::List => {
            ctx.print_lines(sudoers::list(path)?)?;
        }
        SudoersCommands::Remove { pattern } => {
            let removed = ctx
                .pipeline()
                .remove(path, pattern)
                .context("sudoers entries not removed")?;
            ctx.print_success(&format!(
                "Removed {} line(s) containing pattern: {}",
                removed, pattern
            ));
        }
    }
    Ok(())
}
