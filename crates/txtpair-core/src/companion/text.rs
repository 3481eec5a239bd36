//! Plain-text note companions: `photo.txt` alongside `photo.jpg`.

use std::path::{Path, PathBuf};

use super::{companion_path, CompanionHandler};

/// Extension given to derived text companions.
pub const TEXT_EXTENSION: &str = "txt";

/// Image extensions a text companion can pair with.
///
/// Matched case-sensitively and only in these exact spellings: `photo.JPEG`
/// pairs, `photo.Jpeg` does not, and neither do `photo.TIFF` or `photo.BMP`.
pub const IMAGE_EXTENSIONS: [&str; 10] = [
    "gif", "GIF", "jpg", "JPG", "jpeg", "JPEG", "png", "PNG", "tiff", "bmp",
];

/// Handler for `.txt` companion files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCompanion;

impl TextCompanion {
    pub fn new() -> Self {
        Self
    }
}

impl CompanionHandler for TextCompanion {
    fn name(&self) -> &str {
        "text"
    }

    fn derive(&self, primary: &Path) -> PathBuf {
        companion_path(primary, TEXT_EXTENSION)
    }

    fn is_companion(&self, candidate: &Path) -> bool {
        let Some(name) = candidate.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        // the ".txt" check ignores case; the image extension check does not
        let suffix_len = TEXT_EXTENSION.len() + 1;
        if name.len() < suffix_len || !name.to_lowercase().ends_with(".txt") {
            return false;
        }
        let Some(base) = name.get(..name.len() - suffix_len) else {
            return false;
        };

        IMAGE_EXTENSIONS
            .iter()
            .any(|ext| candidate.with_file_name(format!("{base}.{ext}")).exists())
    }
}
