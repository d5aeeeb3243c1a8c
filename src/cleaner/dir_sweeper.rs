//! Empty directory sweep

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::{
    error::{CleanerError, Result},
    utils::is_empty_dir,
};

/// Removes directories left empty below a root, in one deepest-first pass.
///
/// Directories are ordered by descending path length, so every ancestor of a
/// directory is visited after it and sees its removal. The root itself is
/// never removed.
#[derive(Debug, Default)]
pub struct DirSweeper;

impl DirSweeper {
    pub fn new() -> Self {
        Self
    }

    /// Remove empty directories strictly below `dir`, returning the removed paths
    pub fn sweep(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        dirs.sort_by(|a, b| b.as_os_str().len().cmp(&a.as_os_str().len()));

        let mut removed = Vec::new();
        for candidate in dirs {
            if !is_empty_dir(&candidate)? {
                continue;
            }
            fs::remove_dir(&candidate).map_err(|source| CleanerError::RemoveDir {
                path: candidate.clone(),
                source,
            })?;
            debug!("Removed empty directory {}", candidate.display());
            removed.push(candidate);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_empty_dirs_removed_in_one_pass() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        fs::create_dir_all(uploads.join("a/b")).unwrap();

        let removed = DirSweeper::new().sweep(&uploads).unwrap();
        assert_eq!(removed, vec![uploads.join("a/b"), uploads.join("a")]);
        assert!(!uploads.join("a").exists());
        // the sweep root stays even when empty
        assert!(uploads.exists());
    }

    #[test]
    fn test_non_empty_dirs_survive() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        fs::create_dir_all(uploads.join("keep/empty")).unwrap();
        fs::create_dir_all(uploads.join("other")).unwrap();
        fs::write(uploads.join("keep/x.png"), b"x").unwrap();

        let removed = DirSweeper::new().sweep(&uploads).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(uploads.join("keep/x.png").exists());
        assert!(!uploads.join("keep/empty").exists());
        assert!(!uploads.join("other").exists());
    }

    #[test]
    fn test_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let removed = DirSweeper::new().sweep(&dir.path().join("missing")).unwrap();
        assert!(removed.is_empty());
    }
}
