//! Error types for hostsfilter.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsError {
    #[error("Backup of {path:?} to {backup:?} failed, nothing was written: {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied writing {path:?}. Re-run with sudo to modify the hosts file.")]
    Permission { path: PathBuf },

    #[error("File system error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source catalog: {0}")]
    Catalog(String),

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    #[error("No data for sources: {}", .0.join(", "))]
    MissingSourceData(Vec<String>),
}

impl HostsError {
    /// Map an I/O failure on `path`, keeping permission problems distinct
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            HostsError::Permission { path }
        } else {
            HostsError::Io { path, source: err }
        }
    }

    /// Returns `true` if the error calls for elevated privileges
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, HostsError::Permission { .. })
    }
}
