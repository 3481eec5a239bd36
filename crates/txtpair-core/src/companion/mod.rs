//! Companion file pairing and synchronisation.
//!
//! A *companion* is a sidecar file that shares a primary file's base name,
//! e.g. `holiday.txt` next to `holiday.jpg`. Each kind of companion is a
//! [`CompanionHandler`]; the host keeps them in a [`CompanionRegistry`] and
//! forwards its hooks to every handler:
//!
//! - before a copy/move/symlink/delete of a primary file, so the companion
//!   follows it ([`CompanionRegistry::pre_operation`]);
//! - when deciding whether a stray file is alien ([`CompanionRegistry::is_alien`]);
//! - when listing a primary's companions for display ([`CompanionRegistry::companions`]).
//!
//! Handlers hold no state. Every answer is recomputed from the filesystem.

pub mod registry;
pub mod text;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;
use crate::event::{FileOperation, MirrorOutcome, OpKind};
use crate::fs::ops;

pub use registry::CompanionRegistry;
pub use text::TextCompanion;

/// Source-file suffixes the mirroring hook never reacts to. The host reports
/// operations on companion and metadata files through the same hook.
const MANAGED_SUFFIXES: [&str; 2] = [".txt", ".json"];

/// One kind of companion file.
pub trait CompanionHandler: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Returns the companion path for `primary`. Pure; performs no I/O.
    fn derive(&self, primary: &Path) -> PathBuf;

    /// Returns `true` if `candidate` is a companion of some existing primary.
    fn is_companion(&self, candidate: &Path) -> bool;

    /// Lists the companions of `primary` that exist on disk.
    fn companions(&self, primary: &Path) -> Vec<PathBuf> {
        let companion = self.derive(primary);
        if companion.exists() {
            vec![companion]
        } else {
            Vec::new()
        }
    }

    /// Replays `op` onto the companion of its source, if there is one.
    ///
    /// Never fails: errors are logged and returned as
    /// [`MirrorOutcome::Failed`].
    fn mirror(&self, op: &FileOperation) -> MirrorOutcome {
        let source = op.source();
        if is_managed_artifact(source) {
            tracing::debug!("{}: ignoring {} of {}", self.name(), op.kind(), source.display());
            return MirrorOutcome::Skipped;
        }

        let src_companion = self.derive(source);
        if !src_companion.exists() {
            return MirrorOutcome::NoCompanion;
        }

        let dest_companion = op.destination().map(|d| self.derive(d));
        if let Some(dest) = &dest_companion {
            if same_path(&src_companion, dest) {
                tracing::debug!(
                    "{}: {} maps {} onto itself",
                    self.name(),
                    op.kind(),
                    src_companion.display()
                );
                return MirrorOutcome::Skipped;
            }
        }

        let result = match &dest_companion {
            Some(dest) => ops::remove_existing(dest)
                .and_then(|()| transfer(op.kind(), &src_companion, dest)),
            None => ops::delete_file(&src_companion),
        };

        match result {
            Ok(()) => {
                match &dest_companion {
                    Some(dest) => tracing::info!(
                        "{}: {}: {} -> {}",
                        self.name(),
                        op.kind(),
                        display_abs(&src_companion),
                        display_abs(dest)
                    ),
                    None => tracing::info!(
                        "{}: {}: {}",
                        self.name(),
                        op.kind(),
                        display_abs(&src_companion)
                    ),
                }
                MirrorOutcome::Mirrored {
                    kind: op.kind(),
                    source: src_companion,
                    destination: dest_companion,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "{}: {} of companion {} failed: {e}",
                    self.name(),
                    op.kind(),
                    src_companion.display()
                );
                MirrorOutcome::Failed {
                    kind: op.kind(),
                    source: src_companion,
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Returns `dirname(primary)/stem(primary).<extension>`.
///
/// Only the last extension is replaced, so `a.tar.gz` pairs with `a.tar.txt`.
pub fn companion_path(primary: &Path, extension: &str) -> PathBuf {
    match primary.file_stem() {
        Some(stem) => {
            let mut name = OsString::from(stem);
            name.push(".");
            name.push(extension);
            primary.with_file_name(name)
        }
        None => primary.with_extension(extension),
    }
}

/// Returns `true` for companion and metadata files (`.txt`, `.json`, any case).
pub fn is_managed_artifact(path: &Path) -> bool {
    has_suffix_ignore_case(path, &MANAGED_SUFFIXES)
}

fn has_suffix_ignore_case(path: &Path, suffixes: &[&str]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    suffixes.iter().any(|s| name.ends_with(s))
}

fn transfer(kind: OpKind, src: &Path, dest: &Path) -> CoreResult<()> {
    match kind {
        OpKind::Copy => ops::copy_file(src, dest),
        OpKind::Move => ops::move_file(src, dest),
        OpKind::Symlink => ops::symlink_file(src, dest),
        OpKind::Delete => ops::delete_file(src),
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (ops::absolute(a), ops::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn display_abs(path: &Path) -> String {
    ops::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
