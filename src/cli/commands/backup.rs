//! Backup and restore commands

use anyhow::Result;
use colored::Colorize;

use crate::cli::Context;
use crate::model::Target;

/// Snapshot the selected targets
pub fn backup(ctx: &Context, targets: &[Target]) -> Result<()> {
    let created = ctx.backup_manager().create_backups(targets)?;

    for (target, path) in &created {
        ctx.print_success(&format!(
            "Backed up {} -> {}",
            target,
            path.display().to_string().cyan()
        ));
    }
    Ok(())
}

/// Restore the latest snapshot of each selected target
pub fn restore(ctx: &Context, targets: &[Target]) -> Result<()> {
    let manager = ctx.backup_manager();
    let report = manager.restore(targets, &ctx.pipeline())?;

    for missing in &report.missing {
        ctx.print_warning(&missing.to_string());
    }
    for (target, path) in &report.restored {
        ctx.print_success(&format!(
            "Restored {} -> {}",
            target,
            path.display().to_string().cyan()
        ));
    }
    if report.restored.contains_key(&Target::Rc) {
        ctx.print_reload_hint();
    }
    Ok(())
}
