//! txtpair core library — image/companion-text pairing, UI-agnostic.
//!
//! `txtpair-core` keeps a `.txt` note next to an image in step with it.
//! It answers three host questions and reacts to one host hook:
//!
//! - which companions does this image have ([`CompanionRegistry::companions`]);
//! - is this stray file one of ours or alien ([`CompanionRegistry::is_alien`]);
//! - what is this companion's text ([`CompanionDocument`]);
//! - an image is about to be copied, moved, linked or deleted
//!   ([`CompanionRegistry::pre_operation`]).
//!
//! # Modules
//!
//! - [`companion`] — the [`CompanionHandler`] trait, [`TextCompanion`] and [`CompanionRegistry`].
//! - [`fs`] — single-file copy, move, link and delete primitives.
//! - [`event`] — [`FileOperation`] notifications and [`MirrorOutcome`] results.
//! - [`viewer`] — companion text read/edit/save.
//! - [`thumb`] — per-thumbnail link state.
//! - [`config`] — TOML settings.
//! - [`error`] — unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod companion;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod thumb;
pub mod viewer;

pub use companion::{CompanionHandler, CompanionRegistry, TextCompanion};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use event::{FileOperation, MirrorOutcome, OpKind};
pub use fs::ops::{copy_file, delete_file, move_file, symlink_file};
pub use thumb::{LinkStyle, ThumbCompanion};
pub use viewer::CompanionDocument;
