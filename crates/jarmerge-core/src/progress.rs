//! Progress reporting for merge operations.
//!
//! - **`ProgressCallback`**: trait receiving merge lifecycle events
//! - **`NoopProgress`**: callback that ignores every event
//! - **`ProgressReader`**: reader wrapper reporting payload bytes in batches

use std::io::Read;
use std::path::Path;

/// Callback trait for progress reporting during a merge.
///
/// The trait requires `Send` so a merge can run on a worker thread while a
/// UI thread owns the display.
///
/// # Examples
///
/// ```
/// use jarmerge_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_input_start(&mut self, path: &Path, index: usize) {
///         println!("input #{index}: {}", path.display());
///     }
///
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] {name}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before the entries of an input container are streamed.
    ///
    /// `index` is 0 for the first input.
    fn on_input_start(&mut self, path: &Path, index: usize);

    /// Called when starting to process an entry.
    ///
    /// # Arguments
    ///
    /// * `name` - Entry name
    /// * `total` - Total number of entries across all inputs
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called as payload bytes are copied into the output.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been written to the output.
    fn on_entry_complete(&mut self, name: &str);

    /// Called when an entry is skipped because its name was already written.
    fn on_entry_skipped(&mut self, _name: &str) {}

    /// Called once after the output container has been finalized.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_input_start(&mut self, _path: &Path, _index: usize) {}

    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}

/// Default byte threshold between `on_bytes_written` calls (1 MB).
pub const DEFAULT_BATCH_THRESHOLD: u64 = 1024 * 1024;

/// Wrapper reader that reports bytes read to a progress callback.
///
/// Bytes are accumulated and reported once the batch threshold is reached,
/// and any remainder is flushed when the reader is dropped.
///
/// # Examples
///
/// ```
/// use jarmerge_core::NoopProgress;
/// use jarmerge_core::progress::ProgressReader;
/// use std::io::Cursor;
/// use std::io::Read;
///
/// let mut progress = NoopProgress;
/// let mut reader = ProgressReader::new(Cursor::new(vec![0u8; 16]), &mut progress);
/// let mut sink = Vec::new();
/// reader.read_to_end(&mut sink)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct ProgressReader<'a, R> {
    inner: R,
    progress: &'a mut dyn ProgressCallback,
    bytes_since_last_update: u64,
    batch_threshold: u64,
}

impl<'a, R> ProgressReader<'a, R> {
    /// Creates a progress reader with the default 1 MB batch threshold.
    #[must_use]
    pub fn new(inner: R, progress: &'a mut dyn ProgressCallback) -> Self {
        Self::with_batch_threshold(inner, progress, DEFAULT_BATCH_THRESHOLD)
    }

    /// Creates a progress reader with a custom batch threshold.
    #[must_use]
    pub fn with_batch_threshold(
        inner: R,
        progress: &'a mut dyn ProgressCallback,
        batch_threshold: u64,
    ) -> Self {
        Self {
            inner,
            progress,
            bytes_since_last_update: 0,
            batch_threshold,
        }
    }

    /// Reports any accumulated bytes to the callback.
    pub fn flush_progress(&mut self) {
        if self.bytes_since_last_update > 0 {
            self.progress.on_bytes_written(self.bytes_since_last_update);
            self.bytes_since_last_update = 0;
        }
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes_read = self.inner.read(buf)?;
        if bytes_read > 0 {
            self.bytes_since_last_update += bytes_read as u64;
            if self.bytes_since_last_update >= self.batch_threshold {
                self.flush_progress();
            }
        }
        Ok(bytes_read)
    }
}

impl<R> Drop for ProgressReader<'_, R> {
    fn drop(&mut self) {
        self.flush_progress();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[derive(Default)]
    struct RecordingProgress {
        byte_updates: Vec<u64>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_input_start(&mut self, _path: &Path, _index: usize) {}

        fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

        fn on_bytes_written(&mut self, bytes: u64) {
            self.byte_updates.push(bytes);
        }

        fn on_entry_complete(&mut self, _name: &str) {}

        fn on_complete(&mut self) {}
    }

    #[test]
    fn test_progress_reader_batches_updates() {
        let mut progress = RecordingProgress::default();
        {
            let mut reader =
                ProgressReader::with_batch_threshold(Cursor::new(vec![1u8; 250]), &mut progress, 100);
            let mut buf = [0u8; 50];
            while reader.read(&mut buf).unwrap() > 0 {}
        }
        // 2 full batches of 100, remaining 50 flushed on drop
        assert_eq!(progress.byte_updates, vec![100, 100, 50]);
    }

    #[test]
    fn test_progress_reader_no_bytes_no_updates() {
        let mut progress = RecordingProgress::default();
        {
            let mut reader = ProgressReader::new(Cursor::new(Vec::new()), &mut progress);
            let mut sink = Vec::new();
            reader.read_to_end(&mut sink).unwrap();
        }
        assert!(progress.byte_updates.is_empty());
    }

    #[test]
    fn test_progress_reader_passes_data_through() {
        let mut progress = NoopProgress;
        let mut reader = ProgressReader::new(Cursor::new(b"abc".to_vec()), &mut progress);
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_noop_progress_default_skip_hook() {
        let mut progress = NoopProgress;
        progress.on_entry_skipped("META-INF/MANIFEST.MF");
        progress.on_complete();
    }
}
