//! The host-side list of companion handlers.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{CompanionHandler, TextCompanion};
use crate::event::{FileOperation, MirrorOutcome};

/// Dispatches host hooks to every registered [`CompanionHandler`].
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use txtpair_core::{CompanionRegistry, FileOperation, OpKind};
///
/// let registry = CompanionRegistry::default();
/// let op = FileOperation::new(OpKind::Delete, "holiday.jpg", None).unwrap();
/// registry.pre_operation(&op);
/// assert!(registry.is_alien(Path::new("unrelated.txt")));
/// ```
pub struct CompanionRegistry {
    handlers: Vec<Box<dyn CompanionHandler>>,
}

impl CompanionRegistry {
    /// Creates a registry with no handlers.
    pub fn empty() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Adds a handler. Handlers are consulted in registration order.
    pub fn register(&mut self, handler: Box<dyn CompanionHandler>) {
        self.handlers.push(handler);
    }

    /// Iterates the registered handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn CompanionHandler> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    /// Notifies every handler that `op` is about to be applied to a primary file.
    ///
    /// Returns one outcome per handler, in registration order. Failures are
    /// already logged; the host is free to ignore the result.
    pub fn pre_operation(&self, op: &FileOperation) -> Vec<MirrorOutcome> {
        self.handlers.iter().map(|h| h.mirror(op)).collect()
    }

    /// Returns `true` unless some handler recognises `path` as its companion.
    pub fn is_alien(&self, path: &Path) -> bool {
        !self.handlers.iter().any(|h| h.is_companion(path))
    }

    /// Lists every existing companion of `primary` across all handlers.
    pub fn companions(&self, primary: &Path) -> Vec<PathBuf> {
        self.handlers
            .iter()
            .flat_map(|h| h.companions(primary))
            .collect()
    }
}

impl Default for CompanionRegistry {
    /// A registry holding the [`TextCompanion`] handler.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(TextCompanion::new()));
        registry
    }
}

impl fmt::Debug for CompanionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.name()))
            .finish()
    }
}
