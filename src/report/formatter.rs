//! Report formatter implementation

use std::io::{self, Write};

use super::{ReportData, ReportError, ReportFormat};
use crate::cleaner::PrunePlan;

pub const DONE_MARKER: &str = "Done";

/// Formats report data for stdout and report files
pub struct ReportFormatter;

impl ReportFormatter {
    /// Write the pre-deletion summary lines
    pub fn write_summary<W: Write>(out: &mut W, plan: &PrunePlan) -> io::Result<()> {
        writeln!(out, "Referenced uploads: {}", plan.relevant.len())?;
        for reference in &plan.relevant {
            writeln!(out, "- {}", reference)?;
        }
        writeln!(out, "All image files under uploads: {}", plan.candidates.len())?;
        writeln!(out, "Will remove: {}", plan.remove.len())?;
        writeln!(out, "Image bytes total: {}", plan.bytes_total())?;
        writeln!(out, "Image bytes to remove: {}", plan.bytes_to_remove())?;
        out.flush()
    }

    pub fn write_done<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", DONE_MARKER)?;
        out.flush()
    }

    pub fn format(data: &ReportData, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::PlainText => Ok(Self::to_text(data)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        }
    }

    fn to_text(data: &ReportData) -> String {
        let mut output = String::new();
        output.push_str("Upload Prune Report\n");
        output.push_str("===================\n\n");
        output.push_str(&format!("Generated: {}\n", data.generated_at));
        output.push_str(&format!("Root: {}\n", data.root.display()));
        output.push_str(&format!("Dry run: {}\n", data.dry_run));
        output.push_str(&format!("Documents scanned: {}\n\n", data.documents_scanned));

        output.push_str(&format!("Referenced uploads: {}\n", data.referenced_uploads.len()));
        for reference in &data.referenced_uploads {
            output.push_str(&format!("- {}\n", reference));
        }
        output.push_str(&format!("All image files under uploads: {}\n", data.image_count));
        output.push_str(&format!("Will remove: {}\n", data.remove_count));
        output.push_str(&format!("Image bytes total: {}\n", data.bytes_total));
        output.push_str(&format!("Image bytes to remove: {}\n\n", data.bytes_to_remove));

        output.push_str("Removed files:\n");
        for path in &data.removed_files {
            output.push_str(&format!("- {}\n", path.display()));
        }
        output.push_str("Removed directories:\n");
        for path in &data.removed_dirs {
            output.push_str(&format!("- {}\n", path.display()));
        }
        output
    }
}
