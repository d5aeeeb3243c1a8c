//! Orphaned upload pruner for static site exports
//!
//! Scans the text documents of an export for resource references and deletes
//! every image under the uploads directory that none of them point at.

// Configuration and Core Pipeline
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Stage 1: Reference Scanning
pub mod normalizer;
pub mod scanner;

// Stage 2: Planning & Removal
pub mod cleaner;

// Stage 3: Reporting
pub mod report;

// Shared Utilities
pub mod utils;

// Re-exports for crate consumers
pub use cleaner::{DirSweeper, ImagePruner, PruneOutcome, PrunePlan};
pub use config::PruneConfig;
pub use error::{Error, Result};
pub use normalizer::normalize;
pub use pipeline::{Pipeline, PipelineReport};
pub use report::{ReportConfig, ReportData, ReportFormat, ReportGenerator};
pub use scanner::{ReferenceScanner, ScanResult};
pub use types::{ImageFile, Reference, ReferenceSet};
