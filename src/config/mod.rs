//! Runtime settings resolved once at startup
//!
//! Every path is looked up in the environment first, then in the config
//! file, then falls back to a built-in default. Nothing below reads the
//! environment after [`Settings`] is built.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{ConfigFile, ShellType, ToolsConfig};

pub const ENV_RC_FILE: &str = "BASM_RC_FILE";
pub const ENV_SUDOERS_PATH: &str = "BASM_SUDOERS_PATH";
pub const ENV_BACKUP_DIR: &str = "BASM_BACKUP_DIR";
pub const ENV_CONFIG: &str = "BASM_CONFIG";

/// The system sudoers location; writes here go through the privileged helper
pub const SYSTEM_SUDOERS: &str = "/etc/sudoers";
pub const DEFAULT_BACKUP_DIR: &str = "/tmp";
pub const DEFAULT_SHELL: &str = "/bin/bash";

#[derive(Debug, Clone)]
pub struct Settings {
    pub rc_file: PathBuf,
    pub sudoers_path: PathBuf,
    pub backup_dir: PathBuf,
    pub shell: String,
    pub tools: ToolsConfig,
}

impl Settings {
    /// Resolve settings from the process environment and the config file
    pub fn from_env() -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let config_path = non_empty(env(ENV_CONFIG))
            .map(PathBuf::from)
            .unwrap_or_else(ConfigFile::default_path);
        let file = ConfigFile::load(&config_path)?;
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        Ok(Self::resolve(env, &home, file))
    }

    /// Resolve settings from an arbitrary variable lookup
    pub fn resolve<F>(env: F, home: &Path, file: ConfigFile) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let shell = non_empty(env("SHELL")).unwrap_or_else(|| DEFAULT_SHELL.to_string());
        let lookup = |key: &str, configured: Option<String>| {
            non_empty(env(key))
                .map(PathBuf::from)
                .or_else(|| non_empty(configured).map(|p| expand_tilde(&p, home)))
        };

        let rc_file = lookup(ENV_RC_FILE, file.paths.rc_file)
            .unwrap_or_else(|| ShellType::from_shell_path(&shell).default_rc_path(home));
        let sudoers_path =
            lookup(ENV_SUDOERS_PATH, file.paths.sudoers).unwrap_or_else(|| SYSTEM_SUDOERS.into());
        let backup_dir = lookup(ENV_BACKUP_DIR, file.paths.backup_dir)
            .unwrap_or_else(|| DEFAULT_BACKUP_DIR.into());

        Self {
            rc_file,
            sudoers_path,
            backup_dir,
            shell,
            tools: file.tools,
        }
    }

    pub fn is_system_sudoers(path: &Path) -> bool {
        path == Path::new(SYSTEM_SUDOERS)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Expand tilde (~) in path to home directory
fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    match path.strip_prefix('~') {
        Some(stripped) => home.join(stripped.trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}
