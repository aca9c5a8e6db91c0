//! Source the RC file in a subshell

use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::Command;

use crate::cli::Context;

/// Execute the apply command
///
/// The subshell's environment dies with it; the caller's shell is unchanged.
pub fn execute(ctx: &Context) -> Result<()> {
    let shell = &ctx.settings.shell;
    let status = source_command(shell, &ctx.settings.rc_file)
        .status()
        .with_context(|| format!("failed to run {}", shell))?;

    if !status.success() {
        ctx.print_warning(&format!("{} exited with {}", shell, status));
    }
    println!("Sourced rc in a subshell (this does not affect the current shell session).");
    Ok(())
}

/// `<shell> -c '. "$1"' <shell> <rc>`
///
/// The path travels as a positional parameter, so it is never parsed as
/// shell syntax.
fn source_command(shell: &str, rc_file: &Path) -> Command {
    let mut cmd = Command::new(shell);
    cmd.arg("-c").arg(". \"$1\"").arg(shell).arg(rc_file);
    cmd
}
