//! Error types for `txtpair-core`.
//!
//! Fallible operations in the core library return [`CoreResult<T>`].
//! Mirroring never surfaces these to the host: failures there are folded
//! into [`crate::event::MirrorOutcome::Failed`] instead.

use std::path::PathBuf;

use crate::event::OpKind;

/// Unified error type for all core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Reading companion text failed.
    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing companion text failed.
    #[error("unable to save {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A copy, move or symlink was described without a destination.
    #[error("{0} requires a destination path")]
    MissingDestination(OpKind),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to [`CoreError::NotFound`] or
    /// [`CoreError::PermissionDenied`] where the kind allows it.
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

/// Convenience alias used throughout `txtpair-core`.
pub type CoreResult<T> = Result<T, CoreError>;
