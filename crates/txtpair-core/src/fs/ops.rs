//! Single-file filesystem operations.
//!
//! These are the primitives used both by the host (to act on the image
//! itself) and by companion mirroring. They operate on files and symlinks
//! only; directories are never followed or recursed into.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Returns `true` if anything exists at `path`, including a dangling symlink.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Copies a single file's contents to `dest`, creating missing parent
/// directories.
///
/// A symlink at `src` is followed: `dest` becomes an independent regular
/// file holding the target's bytes.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` (or its link target) does not exist.
/// - [`CoreError::Io`] for any I/O failure during copy.
pub fn copy_file(src: &Path, dest: &Path) -> CoreResult<()> {
    std::fs::metadata(src).map_err(|e| CoreError::from_io(src, e))?;
    create_parent(dest)?;
    std::fs::copy(src, dest)?;
    Ok(())
}

fn create_parent(dest: &Path) -> CoreResult<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Recreates `src` at `dest` for the cross-device move fallback: a symlink
/// stays a symlink with the same target, anything else is copied.
fn relocate(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(src).map_err(|e| CoreError::from_io(src, e))?;
    if !meta.is_symlink() {
        return copy_file(src, dest);
    }

    create_parent(dest)?;
    let link_target = std::fs::read_link(src)?;
    #[cfg(unix)]
    std::os::unix::fs::symlink(&link_target, dest)?;
    #[cfg(not(unix))]
    {
        let _ = link_target;
        std::fs::copy(src, dest)?;
    }
    Ok(())
}

/// Moves a single file to `dest`.
///
/// Attempts a fast `rename` first. If rename fails (e.g. cross-device),
/// falls back to copy + delete.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::Io`] for any I/O failure.
pub fn move_file(src: &Path, dest: &Path) -> CoreResult<()> {
    if !entry_exists(src) {
        return Err(CoreError::NotFound(src.to_path_buf()));
    }

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("rename {} failed ({e}), copying instead", src.display());
            relocate(src, dest)?;
            delete_file(src)
        }
    }
}

/// Creates a symbolic link at `link` pointing to the absolute form of `target`.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `target` does not exist.
/// - [`CoreError::Io`] if the link cannot be created (e.g. `link` exists).
pub fn symlink_file(target: &Path, link: &Path) -> CoreResult<()> {
    if !entry_exists(target) {
        return Err(CoreError::NotFound(target.to_path_buf()));
    }
    let target = absolute(target)?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(&target, link)?;
    #[cfg(windows)]
    std::os::windows::fs::symlink_file(&target, link)?;

    Ok(())
}

/// Deletes a single file or symlink. Directories are rejected.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::Io`] if `path` is a directory or removal fails.
pub fn delete_file(path: &Path) -> CoreResult<()> {
    // symlink_metadata: a symlink is removed, never its target
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(path, e))?;

    if meta.is_dir() {
        return Err(CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("refusing to delete directory {}", path.display()),
        )));
    }
    std::fs::remove_file(path)?;
    Ok(())
}

/// Removes whatever file or symlink sits at `path`. Absent paths are fine.
///
/// Used to clear a destination before a copy, move or link is written
/// over it, since overwrite semantics differ between platforms.
pub fn remove_existing(path: &Path) -> CoreResult<()> {
    if entry_exists(path) {
        delete_file(path)?;
    }
    Ok(())
}

/// Lists the regular files and symlinks directly inside `dir`, sorted by path.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — the path is not a directory, or another I/O error.
pub fn list_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| CoreError::from_io(dir, e))?;

    let mut files = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let ft = match dir_entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };
        if !ft.is_dir() {
            files.push(dir_entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Returns `path` made absolute against the current directory, without
/// resolving symlinks.
pub fn absolute(path: &Path) -> CoreResult<PathBuf> {
    Ok(std::path::absolute(path)?)
}
