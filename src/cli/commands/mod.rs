//! CLI command implementations

pub mod apply;
pub mod backup;
pub mod rc;
pub mod sudoers;

use anyhow::Result;

use crate::cli::args::{AliasCommands, Commands, ExportCommands};
use crate::cli::Context;
use crate::model::{Entry, EntryType};

/// Route a parsed command to its implementation
pub fn execute(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::Alias { action } => match action {
            AliasCommands::Add { name, command } => rc::add(ctx, &Entry::alias(name, command)?),
            AliasCommands::List => rc::list(ctx, EntryType::Alias),
            AliasCommands::Remove { name } => rc::remove(ctx, EntryType::Alias, name),
        },
        Commands::Export { action } => match action {
            ExportCommands::Add { var, value } => rc::add(ctx, &Entry::export(var, value)?),
            ExportCommands::List => rc::list(ctx, EntryType::EnvVar),
            ExportCommands::Remove { var } => rc::remove(ctx, EntryType::EnvVar, var),
        },
        Commands::Sudoers { action } => sudoers::execute(ctx, action),
        Commands::Backup(args) => backup::backup(ctx, &args.targets()),
        Commands::Restore(args) => backup::restore(ctx, &args.targets()),
        Commands::Apply => apply::execute(ctx),
    }
}
