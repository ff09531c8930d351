//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use jarmerge_core::MergeReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

const OPERATION: &str = "merge";

pub struct JsonFormatter;

#[derive(Serialize)]
struct InputOutput {
    path: String,
    entries_read: usize,
    entries_written: usize,
    duplicates_skipped: usize,
}

#[derive(Serialize)]
struct MergeOutput {
    output_path: String,
    files_written: usize,
    directories_written: usize,
    duplicates_skipped: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    skipped_entries: Vec<String>,
    inputs: Vec<InputOutput>,
    duration_ms: u128,
}

impl MergeOutput {
    fn new(output_path: &Path, report: &MergeReport) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            files_written: report.files_written,
            directories_written: report.directories_written,
            duplicates_skipped: report.duplicates_skipped(),
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            skipped_entries: report.skipped_entries.clone(),
            inputs: report
                .inputs
                .iter()
                .map(|input| InputOutput {
                    path: input.path.display().to_string(),
                    entries_read: input.entries_read,
                    entries_written: input.entries_written,
                    duplicates_skipped: input.duplicates_skipped,
                })
                .collect(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_merge_result(&self, output_path: &Path, report: &MergeReport) -> Result<()> {
        let output = JsonOutput::success(OPERATION, MergeOutput::new(output_path, report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error(OPERATION, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        // stdout carries exactly one JSON document
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jarmerge_core::InputSummary;
    use serde_json::Value;

    #[test]
    fn test_merge_output_structure() {
        let mut report = MergeReport::new();
        report.files_written = 3;
        report.bytes_written = 300;
        report.bytes_compressed = 150;
        report.skipped_entries = vec!["b.txt".to_string()];
        report.inputs.push(InputSummary::new("a.jar"));

        let output = JsonOutput::success(OPERATION, MergeOutput::new(Path::new("out.jar"), &report));
        let value: Value = serde_json::from_str(&serde_json::to_string(&output).unwrap()).unwrap();

        assert_eq!(value["operation"], "merge");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["output_path"], "out.jar");
        assert_eq!(value["data"]["files_written"], 3);
        assert_eq!(value["data"]["duplicates_skipped"], 1);
        assert_eq!(value["data"]["compression_ratio"], 2.0);
        assert_eq!(value["data"]["skipped_entries"][0], "b.txt");
        assert_eq!(value["data"]["inputs"][0]["path"], "a.jar");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_output_structure() {
        let output = JsonOutput::error(OPERATION, "input container not found: a.jar");
        let value: Value = serde_json::from_str(&serde_json::to_string(&output).unwrap()).unwrap();

        assert_eq!(value["operation"], "merge");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "input container not found: a.jar");
        assert!(value.get("data").is_none());
    }
}
