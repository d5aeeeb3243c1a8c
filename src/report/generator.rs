//! Report generator implementation

use std::fs;

use tracing::info;

use super::{ReportConfig, ReportData, ReportError, ReportFormatter};

/// Writes report files
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate(data: &ReportData, config: &ReportConfig) -> Result<(), ReportError> {
        let content = ReportFormatter::format(data, config.format)?;
        fs::write(&config.output_path, content).map_err(|source| ReportError::Write {
            path: config.output_path.clone(),
            source,
        })?;
        info!("Report written to {}", config.output_path.display());
        Ok(())
    }
}
