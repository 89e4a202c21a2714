use std::collections::BTreeSet;
use std::path::Path;

/// Names of files that may be listed and viewed but never edited or deleted.
#[derive(Debug, Clone, Default)]
pub struct ProtectionPolicy {
    names: BTreeSet<String>,
}

impl ProtectionPolicy {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self { names: names.into_iter().collect() }
    }

    /// Exact match on the base name only.
    pub fn is_protected(&self, base_name: &str) -> bool {
        self.names.contains(base_name)
    }

    pub fn is_protected_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| self.is_protected(n))
            .unwrap_or(false)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
