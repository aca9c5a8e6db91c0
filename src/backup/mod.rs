//! Backup management module

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use time::OffsetDateTime;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::Target;
use crate::sudoers::Pipeline;

/// Outcome of a restore: what was restored, and which targets had no snapshot
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: BTreeMap<Target, PathBuf>,
    pub missing: Vec<Error>,
}

/// Backup manager
pub struct BackupManager {
    backup_dir: PathBuf,
    rc_file: PathBuf,
    sudoers_path: PathBuf,
}

impl BackupManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            backup_dir: settings.backup_dir.clone(),
            rc_file: settings.rc_file.clone(),
            sudoers_path: settings.sudoers_path.clone(),
        }
    }

    /// Live file behind a target
    pub fn live_path(&self, target: Target) -> &Path {
        match target {
            Target::Rc => &self.rc_file,
            Target::Sudoers => &self.sudoers_path,
        }
    }

    /// Ensure backup directory exists
    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.backup_dir).map_err(|e| Error::path(&self.backup_dir, e))
    }

    /// Snapshot each target as `<basename>.bak.<timestamp>`
    pub fn create_backups(&self, targets: &[Target]) -> Result<BTreeMap<Target, PathBuf>> {
        self.ensure_dir()?;
        let timestamp = timestamp(now());

        let mut created = BTreeMap::new();
        for &target in targets {
            let source = self.live_path(target);
            let backup_path = self
                .backup_dir
                .join(format!("{}.bak.{}", basename(source), timestamp));

            std::fs::copy(source, &backup_path).map_err(|e| Error::path(source, e))?;
            tracing::debug!(file = %target, backup = %backup_path.display(), "backup created");
            created.insert(target, backup_path);
        }
        Ok(created)
    }

    /// All snapshots of a target, in filename order
    pub fn list_backups(&self, target: Target) -> Result<Vec<PathBuf>> {
        if !self.backup_dir.is_dir() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}.bak.", basename(self.live_path(target)));

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.backup_dir).map_err(|e| Error::path(&self.backup_dir, e))? {
            let entry = entry.map_err(|e| Error::path(&self.backup_dir, e))?;
            let path = entry.path();
            let matches = path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with(&prefix))
                .unwrap_or(false);
            if matches && path.is_file() {
                entries.push(path);
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Restore the most recent snapshot of each target
    ///
    /// Sudoers snapshots are validated through `pipeline` before they replace
    /// the live file. A target with no snapshot is reported, not fatal.
    pub fn restore(&self, targets: &[Target], pipeline: &Pipeline<'_>) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();

        for &target in targets {
            let candidates = self.list_backups(target)?;
            let Some(latest) = latest_snapshot(&candidates) else {
                report.missing.push(Error::NotFound {
                    target,
                    dir: self.backup_dir.clone(),
                });
                continue;
            };

            let live = self.live_path(target);
            tracing::debug!(file = %target, snapshot = %latest.display(), "restoring");
            match target {
                Target::Rc => {
                    if let Some(parent) = live.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent).map_err(|e| Error::path(parent, e))?;
                    }
                    std::fs::copy(latest, live).map_err(|e| Error::path(live, e))?;
                }
                Target::Sudoers => pipeline.install(latest, live)?,
            }
            report.restored.insert(target, live.to_path_buf());
        }
        Ok(report)
    }
}

/// Pick the snapshot with the latest modification time
///
/// Ties keep the first candidate seen. Unreadable candidates are skipped; if
/// none is readable the first candidate is returned.
pub fn latest_snapshot(candidates: &[PathBuf]) -> Option<&PathBuf> {
    let mut latest: Option<(&PathBuf, SystemTime)> = None;
    for path in candidates {
        let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        match latest {
            Some((_, best)) if modified <= best => {}
            _ => latest = Some((path, modified)),
        }
    }
    latest.map(|(path, _)| path).or_else(|| candidates.first())
}

/// Local wall-clock time, or UTC when the local offset cannot be determined
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|e| {
        tracing::debug!(error = %e, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    })
}

/// `YYYYMMDD_HHMMSS`, sortable both lexically and chronologically
pub fn timestamp(now: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "config".to_string())
}
