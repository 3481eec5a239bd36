//! Event types exchanged between the host and the companion handlers.
//!
//! The host describes a pending file operation as a [`FileOperation`]
//! before performing it. Each handler answers with a [`MirrorOutcome`]
//! describing what, if anything, it did to the companion file.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// The kind of operation the host is about to apply to a primary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Copy,
    Move,
    Symlink,
    Delete,
}

impl OpKind {
    /// Short verb used in log lines.
    pub fn verb(self) -> &'static str {
        match self {
            OpKind::Copy => "copy",
            OpKind::Move => "move",
            OpKind::Symlink => "link",
            OpKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A file operation the host is about to perform on a primary file.
///
/// Flows **host → handlers**, always *before* the primary is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Copy `source` to `destination`.
    Copy { source: PathBuf, destination: PathBuf },
    /// Move (rename) `source` to `destination`.
    Move { source: PathBuf, destination: PathBuf },
    /// Create a symlink at `destination` pointing to `source`.
    Symlink { source: PathBuf, destination: PathBuf },
    /// Delete `source`.
    Delete { source: PathBuf },
}

impl FileOperation {
    /// Builds an operation from its kind and paths.
    ///
    /// `destination` is ignored for [`OpKind::Delete`].
    ///
    /// # Errors
    ///
    /// [`CoreError::MissingDestination`] when a copy, move or symlink is
    /// requested without a destination.
    pub fn new(
        kind: OpKind,
        source: impl Into<PathBuf>,
        destination: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let source = source.into();
        if kind == OpKind::Delete {
            return Ok(FileOperation::Delete { source });
        }
        let destination = destination.ok_or(CoreError::MissingDestination(kind))?;
        Ok(match kind {
            OpKind::Copy => FileOperation::Copy { source, destination },
            OpKind::Move => FileOperation::Move { source, destination },
            OpKind::Symlink => FileOperation::Symlink { source, destination },
            OpKind::Delete => FileOperation::Delete { source },
        })
    }

    pub fn kind(&self) -> OpKind {
        match self {
            FileOperation::Copy { .. } => OpKind::Copy,
            FileOperation::Move { .. } => OpKind::Move,
            FileOperation::Symlink { .. } => OpKind::Symlink,
            FileOperation::Delete { .. } => OpKind::Delete,
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            FileOperation::Copy { source, .. }
            | FileOperation::Move { source, .. }
            | FileOperation::Symlink { source, .. }
            | FileOperation::Delete { source } => source,
        }
    }

    /// The destination path; `None` for deletes.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            FileOperation::Copy { destination, .. }
            | FileOperation::Move { destination, .. }
            | FileOperation::Symlink { destination, .. } => Some(destination),
            FileOperation::Delete { .. } => None,
        }
    }
}

/// What a handler did in response to a [`FileOperation`].
///
/// Mirroring is best-effort: failures are reported here and in the log,
/// never as an `Err` to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// The operation targets a companion or metadata file itself, or would
    /// map a companion onto itself.
    Skipped,
    /// The source has no companion on disk.
    NoCompanion,
    /// The companion was mirrored.
    Mirrored {
        kind: OpKind,
        source: PathBuf,
        destination: Option<PathBuf>,
    },
    /// Mirroring this companion failed and was abandoned.
    Failed {
        kind: OpKind,
        source: PathBuf,
        error: String,
    },
}

impl MirrorOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, MirrorOutcome::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_requires_destination_except_delete() {
        for kind in [OpKind::Copy, OpKind::Move, OpKind::Symlink] {
            let result = FileOperation::new(kind, "a.jpg", None);
            assert!(matches!(result, Err(CoreError::MissingDestination(k)) if k == kind));
        }

        let del = FileOperation::new(OpKind::Delete, "a.jpg", Some("ignored.jpg".into())).unwrap();
        assert_eq!(del, FileOperation::Delete { source: "a.jpg".into() });
        assert_eq!(del.destination(), None);
    }

    #[test]
    fn accessors_report_paths_and_kind() {
        let op = FileOperation::new(OpKind::Move, "a.jpg", Some("b/a.jpg".into())).unwrap();
        assert_eq!(op.kind(), OpKind::Move);
        assert_eq!(op.source(), Path::new("a.jpg"));
        assert_eq!(op.destination(), Some(Path::new("b/a.jpg")));
    }

    #[test]
    fn op_kind_display_uses_verb() {
        assert_eq!(OpKind::Symlink.to_string(), "link");
        assert_eq!(OpKind::Delete.to_string(), "delete");
    }

    #[test]
    fn only_failed_is_failure() {
        assert!(!MirrorOutcome::Skipped.is_failure());
        assert!(!MirrorOutcome::NoCompanion.is_failure());
        let failed = MirrorOutcome::Failed {
            kind: OpKind::Copy,
            source: "a.txt".into(),
            error: "boom".into(),
        };
        assert!(failed.is_failure());
    }
}
