//! Sync pass reporting

use std::fmt::Write;

use super::SyncReport;

/// Sync pass reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report for one pass
    #[must_use]
    pub fn generate_summary(title: &str, report: &SyncReport) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "\n=== {title} ===");
        let _ = writeln!(output, "Created:   {}", report.created);
        let _ = writeln!(output, "Updated:   {}", report.updated);
        let _ = writeln!(output, "Unchanged: {}", report.unchanged);
        let _ = writeln!(output, "Missing:   {}", report.missing);

        if report.conflicts > 0 {
            let _ = writeln!(output, "Conflicts: {}", report.conflicts);
        }

        if !report.kept_live.is_empty() {
            let _ = writeln!(
                output,
                "\nKept live version ({}), repository copy still differs:",
                report.kept_live.len()
            );
            for path in &report.kept_live {
                let _ = writeln!(output, "  - {}", path.display());
            }
        }

        if !report.backups.is_empty() {
            let _ = writeln!(output, "\nBackups ({}):", report.backups.len());
            for path in &report.backups {
                let _ = writeln!(output, "  - {}", path.display());
            }
        }

        if !report.warnings.is_empty() {
            let _ = writeln!(output, "\nWarnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                let _ = writeln!(output, "  - {warning}");
            }
        }

        if report.is_clean() {
            output.push_str("Status: ✓ In sync\n");
        } else {
            output.push_str("Status: ✗ Some files were not synchronized\n");
        }

        output
    }
}
