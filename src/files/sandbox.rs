//! Caller path normalisation and root confinement.

use crate::errors::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// The root path as seen by callers.
pub const ROOT: &str = ".";

/// Cleans up a caller-supplied path: surrounding whitespace and quotes go,
/// backslashes become slashes, slash runs collapse, a trailing slash is dropped.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\'').trim_matches('"');
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out != "/" && out.ends_with('/') {
        out.pop();
    }
    if out.is_empty() {
        return ROOT.to_string();
    }
    out
}

/// Joins a normalised relative path onto `parent`, keeping `.` out of the result.
pub fn join_relative(parent: &str, name: &str) -> String {
    if parent == ROOT || parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Parent of a normalised relative path, or `None` at the root.
pub fn parent_of(path: &str) -> Option<String> {
    if path == ROOT || path == "/" {
        return None;
    }
    match path.rsplit_once('/') {
        Some(("", _)) | None => Some(ROOT.to_string()),
        Some((parent, _)) => Some(parent.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
}

impl PathSandbox {
    pub fn new(root: &Path) -> anyhow::Result<Self> {
        Ok(Self { root: dunce::canonicalize(root)? })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` beneath the root.
    ///
    /// Absolute and drive-prefixed inputs are re-rooted rather than honoured. A
    /// `..` that climbs above the root is refused before touching the
    /// filesystem; afterwards symlinks are resolved and the result must still
    /// sit under the canonical root. Paths that do not exist yet resolve
    /// through their nearest existing ancestor.
    pub fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let lexical = self.lexical(path)?;
        self.confine(canonicalize_existing(&lexical)?)
    }

    /// Like [`resolve`](Self::resolve), but the last component is not followed:
    /// only its parent is canonicalized, so a symlink names the link itself.
    pub fn resolve_entry(&self, path: &str) -> AppResult<PathBuf> {
        let lexical = self.lexical(path)?;
        match (lexical.parent(), lexical.file_name()) {
            (Some(parent), Some(name)) if lexical != self.root => {
                let parent = self.confine(canonicalize_existing(parent)?)?;
                Ok(parent.join(name))
            }
            _ => Ok(self.root.clone()),
        }
    }

    /// Joins `path` onto the root without touching the filesystem, refusing
    /// any `..` that climbs above it.
    fn lexical(&self, path: &str) -> AppResult<PathBuf> {
        let mut lexical = self.root.clone();
        let mut depth = 0usize;
        for comp in Path::new(path).components() {
            match comp {
                Component::Normal(part) => {
                    lexical.push(part);
                    depth += 1;
                }
                Component::ParentDir => {
                    if depth == 0 {
                        return Err(AppError::PathOutsideRoot);
                    }
                    lexical.pop();
                    depth -= 1;
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Ok(lexical)
    }

    fn confine(&self, resolved: PathBuf) -> AppResult<PathBuf> {
        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(AppError::PathOutsideRoot)
        }
    }
}

/// Canonicalizes the longest existing prefix of `path` and re-appends the rest.
fn canonicalize_existing(path: &Path) -> AppResult<PathBuf> {
    let mut tail = Vec::new();
    let mut cursor = path;
    loop {
        match dunce::canonicalize(cursor) {
            Ok(mut base) => {
                for part in tail.iter().rev() {
                    base.push(part);
                }
                return Ok(base);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // a dangling symlink has no provable target
                if std::fs::symlink_metadata(cursor).is_ok() {
                    return Err(AppError::PathOutsideRoot);
                }
                let (Some(parent), Some(name)) = (cursor.parent(), cursor.file_name()) else {
                    return Err(AppError::NotFound);
                };
                tail.push(name.to_os_string());
                cursor = parent;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
