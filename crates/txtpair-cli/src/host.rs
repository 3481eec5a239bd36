//! The host side: performs image operations and consults the registry.
//!
//! Every operation notifies the [`CompanionRegistry`] first, then acts on
//! the image itself. Mirror failures are only logged; a failure of the
//! image operation is returned to the caller.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Serialize;
use txtpair_core::companion::text::IMAGE_EXTENSIONS;
use txtpair_core::fs::ops;
use txtpair_core::{CompanionRegistry, Config, FileOperation, MirrorOutcome};

/// How the host sees one file in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileClass {
    /// An image, with whatever companions it has.
    Image { companions: Vec<PathBuf> },
    /// A companion managed by one of the handlers.
    Companion,
    /// Anything else.
    Alien,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub class: FileClass,
}

pub struct Host {
    registry: CompanionRegistry,
    config: Config,
}

impl Host {
    pub fn new(config: Config) -> Self {
        Self {
            registry: CompanionRegistry::default(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mirrors `op` onto companions, then applies it to the image.
    pub fn apply(&self, op: &FileOperation) -> anyhow::Result<Vec<MirrorOutcome>> {
        let outcomes = if self.config.sync.enabled {
            self.registry.pre_operation(op)
        } else {
            tracing::debug!("companion sync disabled");
            Vec::new()
        };

        let source = op.source();
        let result = match op {
            FileOperation::Copy { destination, .. } => ops::copy_file(source, destination),
            FileOperation::Move { destination, .. } => ops::move_file(source, destination),
            FileOperation::Symlink { destination, .. } => ops::symlink_file(source, destination),
            FileOperation::Delete { .. } => ops::delete_file(source),
        };
        result.with_context(|| format!("{} {} failed", op.kind(), source.display()))?;

        Ok(outcomes)
    }

    /// Renames `source` within its directory, carrying companions along.
    pub fn rename(&self, source: &Path, new_name: &str) -> anyhow::Result<Vec<MirrorOutcome>> {
        if !is_valid_filename(new_name) {
            bail!("invalid name: {new_name:?}");
        }
        let op = FileOperation::Move {
            source: source.to_path_buf(),
            destination: source.with_file_name(new_name),
        };
        self.apply(&op)
    }

    pub fn companions(&self, primary: &Path) -> Vec<PathBuf> {
        self.registry.companions(primary)
    }

    /// `"companion"` when a handler claims `path`, `"alien"` otherwise.
    pub fn check_label(&self, path: &Path) -> &'static str {
        if self.registry.is_alien(path) {
            "alien"
        } else {
            "companion"
        }
    }

    pub fn classify(&self, path: &Path) -> FileClass {
        if !self.registry.is_alien(path) {
            FileClass::Companion
        } else if is_image(path) {
            FileClass::Image {
                companions: self.registry.companions(path),
            }
        } else {
            FileClass::Alien
        }
    }

    /// Classifies every file directly inside `dir`.
    pub fn scan(&self, dir: &Path) -> anyhow::Result<Vec<ScanEntry>> {
        let files = ops::list_files(dir).with_context(|| format!("cannot scan {}", dir.display()))?;
        Ok(files
            .into_iter()
            .map(|path| {
                let class = self.classify(&path);
                ScanEntry { path, class }
            })
            .collect())
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
}

fn is_valid_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
