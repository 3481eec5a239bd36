//! Application configuration loaded from a TOML file.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Allowed range for the thumbnail hyperlink font size.
pub const LINK_FONT_SIZE_RANGE: RangeInclusive<u8> = 8..=16;

/// Top-level configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus [`CoreError::NotFound`].
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }
}

/// Settings for the hyperlink shown on thumbnails that have a companion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    /// Raw configured size; read through [`ThumbnailConfig::font_size`].
    #[serde(default = "default_link_font_size")]
    pub link_font_size: i64,
    #[serde(default = "default_link_label")]
    pub link_label: String,
}

impl ThumbnailConfig {
    /// The configured font size, clamped into [`LINK_FONT_SIZE_RANGE`].
    pub fn font_size(&self) -> u8 {
        let (min, max) = (*LINK_FONT_SIZE_RANGE.start(), *LINK_FONT_SIZE_RANGE.end());
        let clamped = self.link_font_size.clamp(i64::from(min), i64::from(max));
        if clamped != self.link_font_size {
            tracing::warn!(
                "link_font_size {} outside {min}..={max}, clamping",
                self.link_font_size
            );
        }
        u8::try_from(clamped).unwrap_or(max)
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            link_font_size: default_link_font_size(),
            link_label: default_link_label(),
        }
    }
}

/// Companion synchronisation switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_link_font_size() -> i64 {
    10
}

fn default_link_label() -> String {
    "[text]".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.thumbnails.link_font_size, 10);
        assert_eq!(config.thumbnails.link_label, "[text]");
        assert!(config.sync.enabled);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[thumbnails]
link_font_size = 14
link_label = "[note]"

[sync]
enabled = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.thumbnails.link_font_size, 14);
        assert_eq!(config.thumbnails.link_label, "[note]");
        assert!(!config.sync.enabled);
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[thumbnails]\nlink_font_size = 12\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.thumbnails.link_font_size, 12);
        assert_eq!(config.thumbnails.link_label, "[text]");
        assert!(config.sync.enabled);
    }

    #[test]
    fn load_empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_malformed_returns_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[thumbnails\nlink_font_size = ").unwrap();

        let result = Config::load_or_default(&path);
        assert!(matches!(result, Err(CoreError::ConfigParse(_))));
    }

    #[test]
    fn load_out_of_range_font_size_is_clamped_not_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[thumbnails]\nlink_font_size = 300\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.thumbnails.link_font_size, 300);
        assert_eq!(config.thumbnails.font_size(), 16);
    }

    #[test]
    fn font_size_is_clamped() {
        let small = ThumbnailConfig {
            link_font_size: 2,
            ..ThumbnailConfig::default()
        };
        let large = ThumbnailConfig {
            link_font_size: 40,
            ..ThumbnailConfig::default()
        };
        let negative = ThumbnailConfig {
            link_font_size: -5,
            ..ThumbnailConfig::default()
        };

        assert_eq!(small.font_size(), 8);
        assert_eq!(negative.font_size(), 8);
        assert_eq!(large.font_size(), 16);
        assert_eq!(ThumbnailConfig::default().font_size(), 10);
    }
}
