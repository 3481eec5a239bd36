//! Companion text viewing and editing.
//!
//! A [`CompanionDocument`] is what a frontend shows when the user clicks a
//! thumbnail's companion link: the full text, freely editable, written back
//! in one piece when the user confirms. Errors here are returned to the
//! caller so they can be shown to the user.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// The editable contents of one companion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionDocument {
    path: PathBuf,
    original: String,
    text: String,
}

impl CompanionDocument {
    /// Reads the whole companion file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::Read`] for any other read failure, including
    ///   content that is not valid UTF-8.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            _ => CoreError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            original: text.clone(),
            text,
        })
    }

    /// Opens `path`, or starts an empty document if it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`CoreError::Read`] if the file exists but cannot be read.
    pub fn open_or_new(path: &Path) -> CoreResult<Self> {
        match Self::open(path) {
            Err(CoreError::NotFound(_)) => Ok(Self {
                path: path.to_path_buf(),
                original: String::new(),
                text: String::new(),
            }),
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Window title for the document, e.g. `Text for holiday.txt`.
    pub fn title(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("Text for {name}")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the edited text. Nothing is written until [`Self::save`].
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// `true` if the text differs from what was last read or saved.
    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    /// Overwrites the companion file with the current text.
    ///
    /// # Errors
    ///
    /// [`CoreError::Write`] if the file cannot be written.
    pub fn save(&mut self) -> CoreResult<()> {
        std::fs::write(&self.path, &self.text).map_err(|e| CoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!("saved {} ({} bytes)", self.path.display(), self.text.len());
        self.original = self.text.clone();
        Ok(())
    }

    /// Drops unsaved edits.
    pub fn revert(&mut self) {
        self.text = self.original.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn open_reads_full_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.txt");
        fs::write(&path, "line one\nline two\n").unwrap();

        let doc = CompanionDocument::open(&path).unwrap();

        assert_eq!(doc.text(), "line one\nline two\n");
        assert_eq!(doc.path(), path);
        assert!(!doc.is_modified());
    }

    #[test]
    fn open_missing_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = CompanionDocument::open(&tmp.path().join("nope.txt"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn open_binary_returns_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let result = CompanionDocument::open(&path);
        assert!(matches!(result, Err(CoreError::Read { .. })));
    }

    #[test]
    fn open_or_new_starts_empty() {
        let tmp = TempDir::new().unwrap();
        let doc = CompanionDocument::open_or_new(&tmp.path().join("new.txt")).unwrap();
        assert_eq!(doc.text(), "");
        assert!(!doc.is_modified());
    }

    #[test]
    fn save_overwrites_whole_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.txt");
        fs::write(&path, "a much longer original text").unwrap();

        let mut doc = CompanionDocument::open(&path).unwrap();
        doc.set_text("short");
        assert!(doc.is_modified());
        doc.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
        assert!(!doc.is_modified());
    }

    #[test]
    fn save_into_missing_directory_returns_write_error() {
        let tmp = TempDir::new().unwrap();
        let mut doc =
            CompanionDocument::open_or_new(&tmp.path().join("gone").join("photo.txt")).unwrap();
        doc.set_text("x");

        assert!(matches!(doc.save(), Err(CoreError::Write { .. })));
    }

    #[test]
    fn revert_discards_edits() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.txt");
        fs::write(&path, "keep").unwrap();

        let mut doc = CompanionDocument::open(&path).unwrap();
        doc.set_text("discard");
        doc.revert();

        assert_eq!(doc.text(), "keep");
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn title_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let doc = CompanionDocument::open_or_new(&tmp.path().join("holiday.txt")).unwrap();
        assert_eq!(doc.title(), "Text for holiday.txt");
    }
}
