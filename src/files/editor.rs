//! Single-line, whole-file rewrites of text files.
//!
//! Every edit reads the file, changes one line in memory and writes the whole
//! file back. There is no locking: two writers of the same file race and the
//! last one wins.

use crate::errors::{AppError, AppResult};
use crate::files::protect::ProtectionPolicy;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineEdit {
    pub operation: EditOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_content: Option<String>,
    pub total_lines: usize,
    pub created: bool,
}

/// Splits on `\n` only, so a `\r` stays with its line; a final newline adds no empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_terminator('\n').map(str::to_string).collect()
}

/// Replaces line `line_number` or, past the end, pads with empty lines and appends.
pub fn apply_edit(lines: &mut Vec<String>, line_number: usize, new_content: &str) -> (EditOperation, Option<String>) {
    if line_number <= lines.len() {
        let old = std::mem::replace(&mut lines[line_number - 1], new_content.to_string());
        (EditOperation::Replace, Some(old))
    } else {
        lines.resize(line_number - 1, String::new());
        lines.push(new_content.to_string());
        (EditOperation::Append, None)
    }
}

/// `max_line` caps how far past the end an append may pad; it is checked before anything is created.
pub fn edit_line(
    policy: &ProtectionPolicy,
    path: &Path,
    line_number: i64,
    new_content: &str,
    max_line: usize,
) -> AppResult<LineEdit> {
    if line_number < 1 {
        return Err(AppError::InvalidLineNumber);
    }
    let line_number = usize::try_from(line_number).map_err(|_| AppError::InvalidLineNumber)?;
    if line_number > max_line {
        return Err(AppError::InvalidLineNumber);
    }
    if policy.is_protected_path(path) {
        return Err(AppError::Protected);
    }
    if path.is_dir() {
        return Err(AppError::IsDirectory);
    }

    let created = !path.exists();
    if created {
        fs::File::create(path)?;
    }

    let content = fs::read_to_string(path)?;
    let mut lines = split_lines(&content);
    let (operation, old_content) = apply_edit(&mut lines, line_number, new_content);
    fs::write(path, lines.join("\n"))?;

    Ok(LineEdit { operation, old_content, total_lines: lines.len(), created })
}

/// Removes a single file. `path` is not followed: a symlink is removed, not its target.
/// Directories are never removed.
pub fn delete(policy: &ProtectionPolicy, path: &Path) -> AppResult<()> {
    let meta = fs::symlink_metadata(path)?;
    if policy.is_protected_path(path) {
        return Err(AppError::Protected);
    }
    if meta.is_dir() {
        return Err(AppError::IsDirectory);
    }
    fs::remove_file(path)?;
    Ok(())
}
