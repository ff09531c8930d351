//! Merge operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Per-input statistics of a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSummary {
    /// Path of the input container.
    pub path: PathBuf,

    /// Entries enumerated from this input.
    pub entries_read: usize,

    /// Entries from this input written to the output.
    pub entries_written: usize,

    /// Entries from this input skipped because an earlier entry had the
    /// same name.
    pub duplicates_skipped: usize,
}

impl InputSummary {
    /// Creates an empty summary for the given input.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Report of a merge operation.
///
/// # Examples
///
/// ```
/// use jarmerge_core::MergeReport;
///
/// let mut report = MergeReport::default();
/// report.files_written = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// Number of file entries written to the output.
    pub files_written: usize,

    /// Number of directory entries written to the output.
    pub directories_written: usize,

    /// Total uncompressed payload bytes written.
    pub bytes_written: u64,

    /// Size of the finished output container in bytes.
    pub bytes_compressed: u64,

    /// Names skipped because an earlier input already provided them, in
    /// encounter order.
    pub skipped_entries: Vec<String>,

    /// Per-input statistics, in merge order.
    pub inputs: Vec<InputSummary>,

    /// Duration of the merge.
    pub duration: Duration,
}

impl MergeReport {
    /// Creates a new empty merge report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries written.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::MergeReport;
    ///
    /// let mut report = MergeReport::new();
    /// report.files_written = 7;
    /// report.directories_written = 2;
    /// assert_eq!(report.entries_written(), 9);
    /// ```
    #[must_use]
    pub fn entries_written(&self) -> usize {
        self.files_written + self.directories_written
    }

    /// Returns the number of duplicate entries skipped.
    #[must_use]
    pub fn duplicates_skipped(&self) -> usize {
        self.skipped_entries.len()
    }

    /// Returns whether any input contributed a name that was already taken.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.skipped_entries.is_empty()
    }

    /// Returns the compression ratio (uncompressed / output size).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }
}
