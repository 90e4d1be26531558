//! State shared by every file pass of one process.
//!
//! The runner owns one [`ProcessCache`] and lends it to each file's linter
//! in turn. Entries are never evicted; later files observe what earlier
//! files recorded.

use std::collections::{BTreeSet, HashMap};

/// Cross-file caches.
#[derive(Debug, Default)]
pub struct ProcessCache {
    shared_modules: HashMap<String, bool>,
    namespace_members: HashMap<String, BTreeSet<String>>,
}

impl ProcessCache {
    /// Creates empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached shared-module classification of a normalized path.
    #[must_use]
    pub fn shared_module(&self, path: &str) -> Option<bool> {
        self.shared_modules.get(path).copied()
    }

    /// Records whether the file at `path` is a shared module.
    pub fn set_shared_module(&mut self, path: impl Into<String>, shared: bool) {
        self.shared_modules.insert(path.into(), shared);
    }

    /// Records `member` under `namespace`.
    ///
    /// Returns false if the name was already declared by an earlier block.
    pub fn declare_namespace_member(&mut self, namespace: &str, member: &str) -> bool {
        self.namespace_members
            .entry(namespace.to_string())
            .or_default()
            .insert(member.to_string())
    }

    /// Names recorded for `namespace`.
    #[must_use]
    pub fn namespace_members(&self, namespace: &str) -> Option<&BTreeSet<String>> {
        self.namespace_members.get(namespace)
    }
}
