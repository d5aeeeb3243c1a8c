//! Upload pruning pipeline: scan, plan, report, delete, sweep
//!
//! Every stage runs to completion before the next starts. Nothing is deleted
//! until the whole plan exists and its summary has been written.

use std::io::Write;

use tracing::{info, instrument};

use crate::{
    cleaner::{ImagePruner, PruneOutcome, PrunePlan},
    config::PruneConfig,
    error::Result,
    report::{ReportData, ReportFormatter},
    scanner::{ReferenceScanner, ScanResult},
};

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub scan: ScanResult,
    pub plan: PrunePlan,
    /// `None` on a dry run
    pub outcome: Option<PruneOutcome>,
}

impl PipelineReport {
    pub fn report_data(&self, config: &PruneConfig) -> ReportData {
        ReportData::new(config.root.clone(), &self.scan, &self.plan, self.outcome.as_ref())
    }
}

#[derive(Debug)]
pub struct Pipeline {
    config: PruneConfig,
}

impl Pipeline {
    pub fn new(config: PruneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    /// Run every stage, writing the human-readable summary to `out`
    #[instrument(skip(self, out), fields(root = %self.config.root.display()))]
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<PipelineReport> {
        self.config.validate()?;

        let scan = self.scan_references()?;

        let pruner = ImagePruner::new(&self.config);
        let plan = pruner.plan(&scan.references)?;

        ReportFormatter::write_summary(out, &plan)?;

        let outcome = if self.config.dry_run {
            info!("Dry run, {} files left in place", plan.remove.len());
            None
        } else {
            Some(pruner.execute(&plan)?)
        };

        ReportFormatter::write_done(out)?;

        Ok(PipelineReport { scan, plan, outcome })
    }

    fn scan_references(&self) -> Result<ScanResult> {
        info!("Scanning {} for references", self.config.root.display());
        let scanner = ReferenceScanner::new(&self.config)?;
        scanner.scan(&self.config.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn test_invalid_config_stops_before_scanning() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PruneConfig::with_root(dir.path());
        config.image_extensions.clear();

        let mut out = Vec::new();
        let err = Pipeline::new(config).execute(&mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_dry_run_deletes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("wp-content/uploads/2024");
        fs::create_dir_all(&uploads).unwrap();
        fs::write(uploads.join("y.png"), b"12345").unwrap();

        let mut config = PruneConfig::with_root(dir.path());
        config.dry_run = true;

        let mut out = Vec::new();
        let report = Pipeline::new(config).execute(&mut out).unwrap();
        assert!(report.outcome.is_none());
        assert_eq!(report.plan.remove.len(), 1);
        assert!(uploads.join("y.png").exists());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Will remove: 1\n"));
        assert!(text.ends_with("Done\n"));
    }
}
