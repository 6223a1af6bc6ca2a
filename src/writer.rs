//! Backup-then-write path for the hosts file.
//!
//! The current file is copied to a timestamped backup before being replaced.
//! If the backup fails, nothing is written. The replacement itself is atomic,
//! so the target is either the old content or the new content, never a mix.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::HostsError;
use crate::fs_abstraction::FileSystem;

/// Timestamp format used in backup file names
const BACKUP_TIMESTAMP: &str = "%Y%m%d-%H%M%S";

/// Backup path for `target`: `<dir>/<name>.<YYYYmmdd-HHMMSS>.bak`.
///
/// `dir` defaults to the target's own directory.
pub fn backup_path(target: &Path, backup_dir: Option<&Path>, now: DateTime<Local>) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hosts".to_string());
    let file_name = format!("{}.{}.bak", name, now.format(BACKUP_TIMESTAMP));

    match backup_dir.or_else(|| target.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Back up `target` and replace it with `content`.
///
/// Returns the backup path, or `None` when there was no existing file to
/// back up.
pub fn write_with_backup<F: FileSystem + ?Sized>(
    fs: &F,
    target: &Path,
    content: &str,
    backup_dir: Option<&Path>,
    now: DateTime<Local>,
) -> Result<Option<PathBuf>, HostsError> {
    let backup = if fs.exists(target) {
        let backup = backup_path(target, backup_dir, now);

        if let Some(dir) = backup_dir {
            fs.create_dir_all(dir).map_err(|e| HostsError::Backup {
                path: target.to_path_buf(),
                backup: backup.clone(),
                source: e,
            })?;
        }

        debug!("Backing up {:?} to {:?}", target, backup);
        fs.copy(target, &backup).map_err(|e| HostsError::Backup {
            path: target.to_path_buf(),
            backup: backup.clone(),
            source: e,
        })?;
        Some(backup)
    } else {
        debug!("{:?} does not exist, nothing to back up", target);
        None
    };

    fs.write_atomic(target, content.as_bytes())
        .map_err(|e| HostsError::from_io(target, e))?;

    info!("Wrote {} bytes to {:?}", content.len(), target);
    Ok(backup)
}

/// Read the current target content; a missing file reads as empty.
pub fn read_current<F: FileSystem + ?Sized>(fs: &F, target: &Path) -> Result<String, HostsError> {
    match fs.read_to_string(target) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(HostsError::from_io(target, e)),
    }
}
