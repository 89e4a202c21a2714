//! The four caller-facing operations: browse, view, edit, delete.
//!
//! Each one checks the permission oracle before anything else, resolves the
//! caller path through the sandbox, and returns plain data for the host to
//! render. Failures are logged once here and handed back as [`AppError`].

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::files::{
    editor::{self, EditOperation},
    listing,
    paginate::paginate,
    preview::{preview, NumberedLine},
    protect::ProtectionPolicy,
    sandbox::{join_relative, normalize_path, parent_of, PathSandbox},
};
use crate::security::PermissionOracle;
use crate::session::SessionStore;
use serde::Serialize;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseEntry {
    pub name: String,
    /// Relative path usable as the next `browse`/`view` argument.
    pub path: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseResult {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub entries: Vec<BrowseEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewResult {
    pub path: String,
    pub size: u64,
    pub total_lines: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub lines: Vec<NumberedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_start: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditResult {
    pub path: String,
    pub line_number: usize,
    pub operation: EditOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_content: Option<String>,
    pub new_content: String,
    pub total_lines: usize,
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub path: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub items_per_page: usize,
    pub max_preview_lines: usize,
    pub max_edit_line: usize,
}

pub struct FileManager {
    sandbox: PathSandbox,
    policy: ProtectionPolicy,
    sessions: SessionStore,
    oracle: Arc<dyn PermissionOracle>,
    limits: Limits,
}

impl FileManager {
    pub fn new(
        sandbox: PathSandbox,
        policy: ProtectionPolicy,
        sessions: SessionStore,
        oracle: Arc<dyn PermissionOracle>,
        limits: Limits,
    ) -> Self {
        Self { sandbox, policy, sessions, oracle, limits }
    }

    pub fn from_config(cfg: &Config, oracle: Arc<dyn PermissionOracle>) -> anyhow::Result<Self> {
        Ok(Self::new(
            PathSandbox::new(&cfg.root.root_dir)?,
            ProtectionPolicy::new(cfg.manager.protected_files.iter().cloned()),
            SessionStore::new(),
            oracle,
            Limits {
                items_per_page: cfg.manager.items_per_page,
                max_preview_lines: cfg.manager.max_preview_lines,
                max_edit_line: cfg.manager.max_edit_line,
            },
        ))
    }

    pub fn root(&self) -> &std::path::Path { self.sandbox.root() }
    pub fn sessions(&self) -> &SessionStore { &self.sessions }
    pub fn policy(&self) -> &ProtectionPolicy { &self.policy }
    pub fn limits(&self) -> Limits { self.limits }

    fn gate(&self, identity: &str) -> AppResult<()> {
        if self.oracle.is_allowed(identity) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    /// Lists the session directory, or `path` when given. A new path starts at
    /// page 1 unless `page` is also given; the session only moves on success.
    pub fn browse(&self, identity: &str, path: Option<&str>, page: Option<i64>) -> AppResult<BrowseResult> {
        self.gate(identity).inspect_err(|e| log_failure(identity, "browse", e))?;
        let session = self.sessions.get(identity);
        let (current_path, requested) = match path {
            Some(p) => (normalize_path(p), page.unwrap_or(1)),
            None => (session.path.clone(), page.unwrap_or(session.page as i64)),
        };
        let result = self.browse_at(&current_path, requested);
        match &result {
            Ok(r) => {
                if path.is_some() {
                    self.sessions.set_path(identity, &current_path);
                }
                self.sessions.set_page(identity, r.page);
            }
            Err(e) => log_failure(identity, "browse", e),
        }
        result
    }

    fn browse_at(&self, path: &str, requested: i64) -> AppResult<BrowseResult> {
        let dir = self.sandbox.resolve(path)?;
        let listing = listing::list(&dir)?;
        let all = listing.combined();
        let page = paginate(&all, requested, self.limits.items_per_page);

        let entries = page
            .items
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let kind = if listing.is_dir(page.offset + i) { EntryKind::Dir } else { EntryKind::File };
                let size = match kind {
                    EntryKind::Dir => None,
                    EntryKind::File => fs::metadata(dir.join(name)).ok().map(|m| m.len()),
                };
                BrowseEntry { name: name.clone(), path: join_relative(path, name), kind, size }
            })
            .collect();

        Ok(BrowseResult {
            path: path.to_string(),
            parent: parent_of(path),
            page: page.page_number,
            total_pages: page.total_pages,
            items_per_page: page.items_per_page,
            total_items: all.len(),
            entries,
            prev_page: (page.page_number > 1).then(|| page.page_number - 1),
            next_page: (page.page_number < page.total_pages).then(|| page.page_number + 1),
        })
    }

    /// Shows at most `max_preview_lines` lines starting at `start_line` (default 1).
    pub fn view(&self, identity: &str, path: &str, start_line: Option<i64>) -> AppResult<ViewResult> {
        self.gate(identity)
            .and_then(|()| self.view_inner(path, start_line.unwrap_or(1)))
            .inspect_err(|e| log_failure(identity, "view", e))
    }

    fn view_inner(&self, path: &str, start_line: i64) -> AppResult<ViewResult> {
        let path = normalize_path(path);
        let full = self.sandbox.resolve(&path)?;
        let meta = fs::metadata(&full)?;
        if meta.is_dir() {
            return Err(AppError::IsDirectory);
        }
        if !meta.is_file() {
            return Err(AppError::Io("not a regular file".into()));
        }
        let bytes = fs::read(&full)?;
        let content = String::from_utf8_lossy(&bytes);
        let max = self.limits.max_preview_lines;
        let p = preview(&content, start_line, max);
        Ok(ViewResult {
            path,
            size: meta.len(),
            total_lines: p.total_lines,
            start_line: p.start_line,
            end_line: p.end_line,
            prev_start: (p.start_line > 1).then(|| p.start_line.saturating_sub(max).max(1)),
            next_start: (p.end_line < p.total_lines).then(|| p.start_line + max),
            lines: p.lines,
        })
    }

    /// Replaces or appends one line, creating the file when it does not exist.
    pub fn edit_line(&self, identity: &str, path: &str, line_number: i64, content: &str) -> AppResult<EditResult> {
        self.gate(identity)
            .and_then(|()| self.edit_inner(path, line_number, content))
            .inspect(|r| {
                info!(identity, path = %r.path, line = r.line_number, operation = ?r.operation, created = r.created, "line edited")
            })
            .inspect_err(|e| log_failure(identity, "edit", e))
    }

    fn edit_inner(&self, path: &str, line_number: i64, content: &str) -> AppResult<EditResult> {
        if line_number < 1 {
            return Err(AppError::InvalidLineNumber);
        }
        let path = normalize_path(path);
        let full = self.sandbox.resolve(&path)?;
        let edit = editor::edit_line(&self.policy, &full, line_number, content, self.limits.max_edit_line)?;
        Ok(EditResult {
            path,
            line_number: line_number as usize,
            operation: edit.operation,
            old_content: edit.old_content,
            new_content: content.to_string(),
            total_lines: edit.total_lines,
            created: edit.created,
        })
    }

    /// Deletes one file as named by the caller; protected files and directories are refused.
    pub fn delete(&self, identity: &str, path: &str) -> AppResult<DeleteResult> {
        self.gate(identity)
            .and_then(|()| {
                let path = normalize_path(path);
                let full = self.sandbox.resolve_entry(&path)?;
                editor::delete(&self.policy, &full)?;
                Ok(DeleteResult { path, deleted: true })
            })
            .inspect(|r| info!(identity, path = %r.path, "file deleted"))
            .inspect_err(|e| log_failure(identity, "delete", e))
    }
}

fn log_failure(identity: &str, op: &str, err: &AppError) {
    warn!(identity, op, code = err.code(), error = %err, "operation failed");
}
