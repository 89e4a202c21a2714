//! Per-identity browsing cursors.

use crate::files::sandbox::ROOT;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub path: String,
    pub page: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self { path: ROOT.to_string(), page: 1 }
    }
}

/// In-memory only; lives as long as the process. Cloning shares the map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the identity's session, created on first access.
    pub fn get(&self, identity: &str) -> Session {
        self.sessions.entry(identity.to_string()).or_default().clone()
    }

    /// Moving to another directory always lands on its first page.
    pub fn set_path(&self, identity: &str, path: &str) {
        let mut s = self.sessions.entry(identity.to_string()).or_default();
        s.path = path.to_string();
        s.page = 1;
    }

    pub fn set_page(&self, identity: &str, page: usize) {
        self.sessions.entry(identity.to_string()).or_default().page = page.max(1);
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}
