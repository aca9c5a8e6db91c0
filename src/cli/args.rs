//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "basm")]
#[command(about = "Shell RC and sudoers manager")]
#[command(version)]
#[command(author)]
#[command(after_help = "Environment overrides:
  BASM_RC_FILE        path to rc file (default: ~/.bashrc or ~/.zshrc)
  BASM_SUDOERS_PATH   path to sudoers (default: /etc/sudoers)
  BASM_BACKUP_DIR     backup directory (default: /tmp)
  BASM_CONFIG         config file (default: <config dir>/basm/config.toml)
  BASM_LOG            log filter, e.g. basm=debug

Examples:
  basm alias add ll \"ls -la\"
  basm alias list
  basm sudoers add \"myuser ALL=(ALL) NOPASSWD: /usr/bin/somebinary\"")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage alias lines in the RC file
    Alias {
        #[command(subcommand)]
        action: AliasCommands,
    },

    /// Manage export lines in the RC file
    Export {
        #[command(subcommand)]
        action: ExportCommands,
    },

    /// Manage sudoers entries (changes are validated before they are applied)
    Sudoers {
        #[command(subcommand)]
        action: SudoersCommands,
    },

    /// Back up files to the backup directory
    Backup(TargetArgs),

    /// Restore the latest backups (sudo may be required)
    Restore(TargetArgs),

    /// Source the RC file in a subshell (does not affect the current shell)
    Apply,
}

#[derive(Subcommand)]
pub enum AliasCommands {
    /// Add alias
    Add {
        /// Alias name
        name: String,
        /// Command the alias expands to
        #[arg(allow_hyphen_values = true)]
        command: String,
    },
    /// List aliases
    List,
    /// Remove alias
    Remove {
        /// Alias name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Add export
    Add {
        /// Variable name
        var: String,
        /// Value (quoted in the file when it contains a space)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List exports
    List,
    /// Remove export
    Remove {
        /// Variable name
        var: String,
    },
}

#[derive(Subcommand)]
pub enum SudoersCommands {
    /// Add sudoers entry (wrap it in quotes)
    Add {
        /// Entry line, e.g. "bob ALL=(ALL) NOPASSWD: /usr/bin/apt"
        #[arg(allow_hyphen_values = true)]
        entry: String,
    },
    /// List non-comment sudoers lines
    List,
    /// Remove lines containing pattern
    Remove {
        /// Substring to match
        #[arg(allow_hyphen_values = true)]
        pattern: String,
    },
}

#[derive(Args, Clone, Copy)]
pub struct TargetArgs {
    /// Skip the RC file
    #[arg(long)]
    pub no_rc: bool,

    /// Skip the sudoers file
    #[arg(long)]
    pub no_sudoers: bool,
}

impl TargetArgs {
    pub fn targets(&self) -> Vec<crate::model::Target> {
        crate::model::Target::selected(!self.no_rc, !self.no_sudoers)
    }
}
