//! Report generation for the pruning pipeline
//!
//! The stdout summary has a fixed line format; the optional report file carries
//! the same figures plus what was actually removed.

use std::path::PathBuf;

use serde::Serialize;

use crate::cleaner::{PruneOutcome, PrunePlan};
use crate::scanner::ScanResult;

pub mod formatter;
pub mod generator;

pub use crate::error::ReportError;
pub use formatter::ReportFormatter;
pub use generator::ReportGenerator;

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub format: ReportFormat,
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    PlainText,
    Json,
    Yaml,
}

/// Complete report data structure
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportData {
    pub generated_at: String,
    pub root: PathBuf,
    pub dry_run: bool,
    pub documents_scanned: usize,
    pub referenced_uploads: Vec<String>,
    pub image_count: usize,
    pub remove_count: usize,
    pub bytes_total: u64,
    pub bytes_to_remove: u64,
    pub removed_files: Vec<PathBuf>,
    pub removed_dirs: Vec<PathBuf>,
}

impl ReportData {
    pub fn new(
        root: PathBuf,
        scan: &ScanResult,
        plan: &PrunePlan,
        outcome: Option<&PruneOutcome>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            root,
            dry_run: outcome.is_none(),
            documents_scanned: scan.documents_scanned,
            referenced_uploads: plan.relevant.iter().map(|r| r.to_string()).collect(),
            image_count: plan.candidates.len(),
            remove_count: plan.remove.len(),
            bytes_total: plan.bytes_total(),
            bytes_to_remove: plan.bytes_to_remove(),
            removed_files: outcome.map(|o| o.files_removed.clone()).unwrap_or_default(),
            removed_dirs: outcome.map(|o| o.dirs_removed.clone()).unwrap_or_default(),
        }
    }
}
