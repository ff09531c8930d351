//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use jarmerge_core::MergeReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    /// Renders the report lines printed below the completion message.
    fn summary_lines(&self, report: &MergeReport) -> Vec<String> {
        let mut lines = vec![
            format!(
                "  Files:            {}",
                Self::format_number(report.files_written)
            ),
            format!(
                "  Directories:      {}",
                Self::format_number(report.directories_written)
            ),
            format!(
                "  Duplicates:       {}",
                Self::format_number(report.duplicates_skipped())
            ),
            format!(
                "  Total size:       {}",
                Self::format_size(report.bytes_written)
            ),
            format!(
                "  Output size:      {}",
                Self::format_size(report.bytes_compressed)
            ),
        ];

        if self.verbose {
            for input in &report.inputs {
                lines.push(format!(
                    "  {}: {} read, {} written, {} skipped",
                    input.path.display(),
                    input.entries_read,
                    input.entries_written,
                    input.duplicates_skipped
                ));
            }
            lines.push(format!("  Duration:         {:?}", report.duration));
            if report.has_duplicates() {
                lines.push(String::new());
                lines.push("Skipped entries:".to_string());
                lines.extend(report.skipped_entries.iter().map(|name| format!("  - {name}")));
            }
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_merge_result(&self, output_path: &Path, report: &MergeReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Merge completed: {}",
                style("✓").green().bold(),
                output_path.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Merge completed: {}", output_path.display()));
        }

        let _ = self.term.write_line("");
        for line in self.summary_lines(report) {
            let _ = self.term.write_line(&line);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarmerge_core::InputSummary;

    fn sample_report() -> MergeReport {
        let mut report = MergeReport::new();
        report.files_written = 1234;
        report.directories_written = 2;
        report.bytes_written = 2048;
        report.bytes_compressed = 1024;
        report.skipped_entries = vec!["META-INF/MANIFEST.MF".to_string()];
        let mut summary = InputSummary::new("mod.jar");
        summary.entries_read = 3;
        summary.entries_written = 2;
        summary.duplicates_skipped = 1;
        report.inputs.push(summary);
        report
    }

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(HumanFormatter::format_size(1536 * 1024 * 1024), "1.5 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_summary_lines_default() {
        let formatter = HumanFormatter::new(false, false);
        let lines = formatter.summary_lines(&sample_report());
        assert!(lines.iter().any(|l| l.contains("1,234")));
        assert!(lines.iter().any(|l| l.contains("Duplicates:       1")));
        assert!(!lines.iter().any(|l| l.contains("MANIFEST.MF")));
    }

    #[test]
    fn test_summary_lines_verbose_lists_skipped() {
        let formatter = HumanFormatter::new(true, false);
        let lines = formatter.summary_lines(&sample_report());
        assert!(lines.iter().any(|l| l == "  - META-INF/MANIFEST.MF"));
        assert!(lines.iter().any(|l| l.contains("mod.jar: 3 read, 2 written, 1 skipped")));
    }
}
