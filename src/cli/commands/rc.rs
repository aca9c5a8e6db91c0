//! Alias and export commands against the RC file

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::cli::Context;
use crate::editor;
use crate::model::{Entry, EntryType};

/// Append the entry's line to the RC file
pub fn add(ctx: &Context, entry: &Entry) -> Result<()> {
    let rc_file = &ctx.settings.rc_file;
    editor::append_line(rc_file, &entry.to_line())
        .with_context(|| format!("failed to add {} '{}'", entry.entry_type.keyword(), entry.name))?;

    ctx.print_success(&format!(
        "{} '{}' added to {}",
        entry.entry_type,
        entry.name.cyan(),
        rc_file.display()
    ));
    ctx.print_reload_hint();
    Ok(())
}

/// Print every line of the given type, verbatim
pub fn list(ctx: &Context, entry_type: EntryType) -> Result<()> {
    let lines = editor::lines_with_prefix(&ctx.settings.rc_file, &entry_type.list_prefix())?;
    ctx.print_lines(lines)
}

/// Remove the line defining `name`; absent names are not an error
pub fn remove(ctx: &Context, entry_type: EntryType, name: &str) -> Result<()> {
    entry_type.validate_name(name)?;
    let rc_file = &ctx.settings.rc_file;
    editor::ensure_file(rc_file)?;
    let removed = editor::remove_lines_with_prefix(rc_file, &entry_type.key_prefix(name))?;

    if removed == 0 {
        ctx.print_warning(&format!(
            "{} '{}' not found in {}",
            entry_type,
            name,
            rc_file.display()
        ));
    } else {
        ctx.print_success(&format!(
            "{} '{}' removed from {}",
            entry_type,
            name.cyan(),
            rc_file.display()
        ));
        ctx.print_reload_hint();
    }
    Ok(())
}
