//! High-level public API for merging containers.

use std::path::Path;

use crate::ArchiveMerger;
use crate::MergeConfig;
use crate::MergeReport;
use crate::ProgressCallback;
use crate::Result;

/// Merges two containers into a new output container.
///
/// Every entry of `first` is copied in its original order, followed by every
/// entry of `second` whose name does not already appear in the output.
/// Payloads are copied byte-for-byte.
///
/// # Arguments
///
/// * `first` - Container whose entries take precedence on name collisions
/// * `second` - Container whose entries fill in names missing from `first`
/// * `output` - Path of the merged container, created or replaced
/// * `config` - Output compression and commit settings
///
/// # Errors
///
/// Returns an error if:
/// - Either input does not exist or cannot be read
/// - Either input is not a ZIP-family container
/// - The output cannot be created or written
/// - The configuration is invalid
///
/// # Examples
///
/// ```no_run
/// use jarmerge_core::MergeConfig;
/// use jarmerge_core::merge_archives;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MergeConfig::default();
/// let report = merge_archives("client.jar", "mod.jar", "merged.jar", &config)?;
/// println!("Merged {} entries", report.entries_written());
/// # Ok(())
/// # }
/// ```
pub fn merge_archives<P, Q, O>(
    first: P,
    second: Q,
    output: O,
    config: &MergeConfig,
) -> Result<MergeReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    ArchiveMerger::new(config.clone()).merge(first, second, output)
}

/// Merges two containers, reporting progress through `progress`.
///
/// # Errors
///
/// Same as [`merge_archives`].
///
/// # Examples
///
/// ```no_run
/// use jarmerge_core::MergeConfig;
/// use jarmerge_core::NoopProgress;
/// use jarmerge_core::merge_archives_with_progress;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut progress = NoopProgress;
/// let report = merge_archives_with_progress(
///     "client.jar",
///     "mod.jar",
///     "merged.jar",
///     &MergeConfig::default(),
///     &mut progress,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn merge_archives_with_progress<P, Q, O>(
    first: P,
    second: Q,
    output: O,
    config: &MergeConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<MergeReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    O: AsRef<Path>,
{
    ArchiveMerger::new(config.clone()).merge_with_progress(first, second, output, progress)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::MergeError;
    use crate::NoopProgress;
    use crate::test_utils::read_zip_file;
    use crate::test_utils::write_test_zip;
    use tempfile::TempDir;

    #[test]
    fn test_merge_archives_first_wins() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("one.jar");
        let second = temp.path().join("two.jar");
        let output = temp.path().join("out.jar");
        write_test_zip(&first, &[("a.txt", "A"), ("b.txt", "B")]);
        write_test_zip(&second, &[("b.txt", "X"), ("c.txt", "C")]);

        let report = merge_archives(&first, &second, &output, &MergeConfig::default()).unwrap();

        let names: Vec<String> = read_zip_file(&output).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(report.duplicates_skipped(), 1);
    }

    #[test]
    fn test_merge_archives_with_progress_malformed_second() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("one.jar");
        let second = temp.path().join("two.jar");
        let output = temp.path().join("out.jar");
        write_test_zip(&first, &[("a.txt", "A")]);
        std::fs::write(&second, vec![b'x'; 1024]).unwrap();

        let result = merge_archives_with_progress(
            &first,
            &second,
            &output,
            &MergeConfig::default(),
            &mut NoopProgress,
        );

        assert!(matches!(
            result,
            Err(MergeError::MalformedContainer { ref path, .. }) if *path == second
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_merge_archives_invalid_config() {
        let temp = TempDir::new().unwrap();
        let config = MergeConfig {
            compression_level: Some(0),
            ..MergeConfig::default()
        };
        let result = merge_archives(
            temp.path().join("a.jar"),
            temp.path().join("b.jar"),
            temp.path().join("out.jar"),
            &config,
        );
        assert!(matches!(
            result,
            Err(MergeError::InvalidCompressionLevel { level: 0 })
        ));
    }
}
