//! Configuration management for txtpair.
//!
//! User preferences ([`settings::Config`]) are stored as a TOML file and
//! loaded at startup. Every field has a default, so the file is optional.

pub mod settings;

pub use settings::{Config, SyncConfig, ThumbnailConfig};
