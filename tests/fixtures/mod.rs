#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway static export tree
pub struct SiteFixture {
    dir: TempDir,
}

impl SiteFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn uploads(&self) -> PathBuf {
        self.root().join("wp-content").join("uploads")
    }

    /// Write a text document relative to the root
    pub fn document(&self, relative: &str, content: &str) -> &Self {
        self.write(relative, content.as_bytes())
    }

    /// Write an image of `len` bytes relative to the uploads directory
    pub fn upload(&self, relative: &str, len: usize) -> &Self {
        let path = self.uploads().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0xAB; len]).unwrap();
        self
    }

    pub fn write(&self, relative: &str, content: &[u8]) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn uploaded(&self, relative: &str) -> bool {
        self.uploads().join(relative).exists()
    }
}
