//! Per-thumbnail companion link state.
//!
//! A frontend keeps one [`ThumbCompanion`] per thumbnail that has a
//! companion. It carries everything the link needs to render and react:
//! label text, font size, selection style and the companion path it is
//! currently bound to.

use std::path::{Path, PathBuf};

use crate::companion::CompanionHandler;
use crate::config::ThumbnailConfig;
use crate::error::CoreResult;
use crate::viewer::CompanionDocument;

/// How the companion link is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Unselected thumbnail: normal hyperlink colour.
    #[default]
    Link,
    /// Selected thumbnail: highlighted text colour.
    Highlighted,
}

/// Companion link attached to one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbCompanion {
    label: String,
    font_size: u8,
    companion: PathBuf,
    style: LinkStyle,
}

impl ThumbCompanion {
    /// Builds the link for a newly created thumbnail of `primary`.
    ///
    /// Returns `None` when `primary` has no companion on disk, in which case
    /// the thumbnail gets no link.
    pub fn for_primary(
        primary: &Path,
        handler: &dyn CompanionHandler,
        config: &ThumbnailConfig,
    ) -> Option<Self> {
        let companion = handler.companions(primary).into_iter().next()?;
        Some(Self {
            label: config.link_label.clone(),
            font_size: config.font_size(),
            companion,
            style: LinkStyle::Link,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    /// The companion file the link currently opens.
    pub fn companion(&self) -> &Path {
        &self.companion
    }

    pub fn style(&self) -> LinkStyle {
        self.style
    }

    /// Updates the link style when the thumbnail is selected or deselected.
    pub fn selection_changed(&mut self, selected: bool) {
        self.style = if selected {
            LinkStyle::Highlighted
        } else {
            LinkStyle::Link
        };
    }

    /// Re-binds the link after the primary was renamed to `new_primary`.
    ///
    /// No files are touched; the companion itself was already moved when
    /// the rename was mirrored.
    pub fn renamed(&mut self, new_primary: &Path, handler: &dyn CompanionHandler) {
        self.companion = handler.derive(new_primary);
    }

    /// Opens the bound companion for viewing or editing.
    ///
    /// # Errors
    ///
    /// See [`CompanionDocument::open`].
    pub fn open(&self) -> CoreResult<CompanionDocument> {
        CompanionDocument::open(&self.companion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companion::TextCompanion;
    use crate::event::{FileOperation, OpKind};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_link_without_companion() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), "").unwrap();

        let thumb = ThumbCompanion::for_primary(
            &tmp.path().join("a.jpg"),
            &TextCompanion,
            &ThumbnailConfig::default(),
        );

        assert!(thumb.is_none());
    }

    #[test]
    fn link_uses_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        let config = ThumbnailConfig {
            link_font_size: 99,
            link_label: "[notes]".to_string(),
        };

        let thumb =
            ThumbCompanion::for_primary(&tmp.path().join("a.jpg"), &TextCompanion, &config)
                .unwrap();

        assert_eq!(thumb.label(), "[notes]");
        assert_eq!(thumb.font_size(), 16);
        assert_eq!(thumb.companion(), tmp.path().join("a.txt"));
        assert_eq!(thumb.style(), LinkStyle::Link);
    }

    #[test]
    fn selection_toggles_style() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        let mut thumb = ThumbCompanion::for_primary(
            &tmp.path().join("a.jpg"),
            &TextCompanion,
            &ThumbnailConfig::default(),
        )
        .unwrap();

        thumb.selection_changed(true);
        assert_eq!(thumb.style(), LinkStyle::Highlighted);
        thumb.selection_changed(false);
        assert_eq!(thumb.style(), LinkStyle::Link);
    }

    #[test]
    fn rename_rebinds_to_moved_companion() {
        let tmp = TempDir::new().unwrap();
        let old_image = tmp.path().join("a.jpg");
        let new_image = tmp.path().join("renamed.jpg");
        fs::write(&old_image, "").unwrap();
        fs::write(tmp.path().join("a.txt"), "remember this").unwrap();

        let mut thumb =
            ThumbCompanion::for_primary(&old_image, &TextCompanion, &ThumbnailConfig::default())
                .unwrap();

        let op = FileOperation::new(OpKind::Move, &old_image, Some(new_image.clone())).unwrap();
        TextCompanion.mirror(&op);
        fs::rename(&old_image, &new_image).unwrap();
        thumb.renamed(&new_image, &TextCompanion);

        assert_eq!(thumb.companion(), tmp.path().join("renamed.txt"));
        assert_eq!(thumb.open().unwrap().text(), "remember this");
    }
}
