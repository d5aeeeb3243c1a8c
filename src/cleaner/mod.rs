//! Cleaner Module Implementation
//!
//! Decides which upload images are orphaned, removes them, then sweeps the
//! directories left empty.

pub mod dir_sweeper;
pub mod image_pruner;

pub use self::{
    dir_sweeper::DirSweeper,
    image_pruner::{classify, ImagePruner, PruneOutcome, PrunePlan},
};
