use crate::errors::{AppError, AppResult};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Immediate children of one directory, directories and files kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

impl DirectoryListing {
    /// Pagination order: directories first, then files.
    pub fn combined(&self) -> Vec<String> {
        self.dirs.iter().chain(self.files.iter()).cloned().collect()
    }

    pub fn is_dir(&self, index: usize) -> bool {
        index < self.dirs.len()
    }
}

/// Case-insensitive, with plain string order breaking ties.
pub fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Best-effort snapshot; entries vanishing mid-listing are skipped.
pub fn list(dir: &Path) -> AppResult<DirectoryListing> {
    let meta = fs::metadata(dir)?;
    if !meta.is_dir() {
        return Err(AppError::NotADirectory);
    }
    let mut listing = DirectoryListing::default();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        // follows symlinks, so a link to a directory is listed as one
        let is_dir = match fs::metadata(entry.path()) {
            Ok(m) => m.is_dir(),
            Err(_) => false,
        };
        if is_dir {
            listing.dirs.push(name);
        } else {
            listing.files.push(name);
        }
    }
    listing.dirs.sort_by(|a, b| name_order(a, b));
    listing.files.sort_by(|a, b| name_order(a, b));
    Ok(listing)
}
