//! Orphaned upload detection and removal

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use super::dir_sweeper::DirSweeper;
use crate::{
    config::PruneConfig,
    error::{CleanerError, Result},
    types::{ImageFile, ReferenceSet},
    utils::has_allowed_extension,
};

/// Everything decided before the first deletion
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrunePlan {
    /// References under the uploads prefix
    pub relevant: ReferenceSet,
    /// Every image under the uploads subtree
    pub candidates: Vec<ImageFile>,
    pub keep: Vec<ImageFile>,
    pub remove: Vec<ImageFile>,
}

impl PrunePlan {
    pub fn bytes_total(&self) -> u64 {
        self.candidates.iter().map(|image| image.size).sum()
    }

    pub fn bytes_to_remove(&self) -> u64 {
        self.remove.iter().map(|image| image.size).sum()
    }
}

/// What actually happened on disk
#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneOutcome {
    pub files_removed: Vec<PathBuf>,
    pub bytes_freed: u64,
    pub dirs_removed: Vec<PathBuf>,
}

/// Split candidates into (keep, remove).
///
/// A candidate is kept iff its path equals `root` joined with one of the
/// relevant references.
pub fn classify(
    root: &Path,
    relevant: &ReferenceSet,
    candidates: &[ImageFile],
) -> (Vec<ImageFile>, Vec<ImageFile>) {
    let keep_paths: HashSet<PathBuf> = relevant.iter().map(|reference| reference.resolve(root)).collect();
    candidates
        .iter()
        .cloned()
        .partition(|image| keep_paths.contains(&image.path))
}

#[derive(Debug)]
pub struct ImagePruner {
    root: PathBuf,
    uploads: PathBuf,
    reference_prefix: String,
    image_extensions: Vec<String>,
    remove_empty_dirs: bool,
}

impl ImagePruner {
    pub fn new(config: &PruneConfig) -> Self {
        Self {
            root: config.root.clone(),
            uploads: config.uploads_path(),
            reference_prefix: config.reference_prefix.clone(),
            image_extensions: config.image_extensions.clone(),
            remove_empty_dirs: config.remove_empty_dirs,
        }
    }

    pub fn uploads(&self) -> &Path {
        &self.uploads
    }

    /// References that point into the uploads subtree
    pub fn relevant_references(&self, references: &ReferenceSet) -> ReferenceSet {
        references
            .iter()
            .filter(|reference| reference.starts_with(&self.reference_prefix))
            .cloned()
            .collect()
    }

    /// Every image file below the uploads directory, with its current size
    #[instrument(skip(self))]
    pub fn enumerate_candidates(&self) -> Result<Vec<ImageFile>> {
        if !self.uploads.exists() {
            warn!("Uploads directory {} does not exist", self.uploads.display());
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(&self.uploads)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !has_allowed_extension(path, &self.image_extensions) || !path.is_file() {
                continue;
            }
            let size = fs::metadata(path)
                .map_err(|source| CleanerError::Metadata {
                    path: path.to_path_buf(),
                    source,
                })?
                .len();
            candidates.push(ImageFile::new(entry.into_path(), size));
        }

        debug!("Found {} candidate images", candidates.len());
        Ok(candidates)
    }

    /// Compute the full keep/remove decision without touching the disk
    pub fn plan(&self, references: &ReferenceSet) -> Result<PrunePlan> {
        let relevant = self.relevant_references(references);
        let candidates = self.enumerate_candidates()?;
        let (keep, remove) = classify(&self.root, &relevant, &candidates);

        info!(
            "{} relevant references, keeping {} of {} images",
            relevant.len(),
            keep.len(),
            candidates.len()
        );

        Ok(PrunePlan {
            relevant,
            candidates,
            keep,
            remove,
        })
    }

    /// Delete the remove set, then sweep empty directories.
    ///
    /// The first failed deletion aborts; files already removed stay removed.
    #[instrument(skip(self, plan))]
    pub fn execute(&self, plan: &PrunePlan) -> Result<PruneOutcome> {
        let mut outcome = PruneOutcome::default();

        for image in &plan.remove {
            fs::remove_file(&image.path).map_err(|source| CleanerError::RemoveFile {
                path: image.path.clone(),
                source,
            })?;
            debug!("Removed {} ({} bytes)", image.path.display(), image.size);
            outcome.files_removed.push(image.path.clone());
            outcome.bytes_freed += image.size;
        }

        if self.remove_empty_dirs {
            outcome.dirs_removed = DirSweeper::new().sweep(&self.uploads)?;
        }

        info!(
            "Removed {} files ({} bytes) and {} empty directories",
            outcome.files_removed.len(),
            outcome.bytes_freed,
            outcome.dirs_removed.len()
        );
        Ok(outcome)
    }
}
