//! Container merge engine.
//!
//! Inputs are streamed one after another into a single output container.
//! Every entry is copied unless an earlier entry with the same name has
//! already been written, in which case it is skipped. Earlier inputs
//! therefore take precedence on name collisions.

use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::debug;
use tracing::info;
use tracing::instrument;
use zip::ZipWriter;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::MergeConfig;
use crate::MergeError;
use crate::MergeReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::SeenNames;
use crate::container::InputContainer;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_with_buffer;
use crate::output::OutputTarget;
use crate::output::ensure_distinct_output;
use crate::progress::ProgressReader;
use crate::report::InputSummary;

/// Label used in errors when merging into a caller-supplied writer.
const STREAM_OUTPUT_LABEL: &str = "<output stream>";

/// Merges ZIP-family containers, keeping the first entry for each name.
///
/// # Examples
///
/// ```no_run
/// use jarmerge_core::ArchiveMerger;
/// use jarmerge_core::MergeConfig;
///
/// let merger = ArchiveMerger::new(MergeConfig::default());
/// let report = merger.merge("client.jar", "mod.jar", "merged.jar")?;
/// println!(
///     "wrote {} entries, skipped {} duplicates",
///     report.entries_written(),
///     report.duplicates_skipped()
/// );
/// # Ok::<(), jarmerge_core::MergeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveMerger {
    config: MergeConfig,
}

impl ArchiveMerger {
    /// Creates a merger with the given configuration.
    #[must_use]
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Returns the merger configuration.
    #[must_use]
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merges `first` and `second` into `output`.
    ///
    /// Entries of `first` win over same-named entries of `second`.
    ///
    /// # Errors
    ///
    /// Returns an error if an input is missing, unreadable or malformed, or
    /// if the output cannot be written.
    pub fn merge<P, Q, O>(&self, first: P, second: Q, output: O) -> Result<MergeReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        self.merge_with_progress(first, second, output, &mut NoopProgress)
    }

    /// Merges `first` and `second` into `output`, reporting progress.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveMerger::merge`].
    pub fn merge_with_progress<P, Q, O>(
        &self,
        first: P,
        second: Q,
        output: O,
        progress: &mut dyn ProgressCallback,
    ) -> Result<MergeReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        self.merge_all(&[first.as_ref(), second.as_ref()], output, progress)
    }

    /// Merges any number of inputs into `output`.
    ///
    /// Precedence follows slice order. All inputs are opened before the
    /// output is created, so a missing or malformed input never produces an
    /// output file.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveMerger::merge`], plus `InvalidCompressionLevel` for
    /// an invalid configuration and `OutputAliasesInput` when writing in
    /// place over one of the inputs.
    #[instrument(
        skip_all,
        fields(output = %output.as_ref().display(), inputs = inputs.len())
    )]
    pub fn merge_all<P, O>(
        &self,
        inputs: &[P],
        output: O,
        progress: &mut dyn ProgressCallback,
    ) -> Result<MergeReport>
    where
        P: AsRef<Path>,
        O: AsRef<Path>,
    {
        self.config.validate()?;
        let output = output.as_ref();
        let start = Instant::now();

        let mut containers = inputs
            .iter()
            .map(InputContainer::open)
            .collect::<Result<Vec<_>>>()?;

        if !self.config.atomic {
            ensure_distinct_output(output, containers.iter().map(InputContainer::path))?;
        }

        let (target, writer) = OutputTarget::create(output, self.config.atomic)?;
        let (writer, mut report) =
            self.stream_inputs(&mut containers, writer, output, progress)?;
        drop(containers);

        report.bytes_compressed = target.commit(writer)?;
        report.duration = start.elapsed();
        progress.on_complete();

        info!(
            files = report.files_written,
            directories = report.directories_written,
            duplicates = report.duplicates_skipped(),
            bytes = report.bytes_compressed,
            "merge complete"
        );
        Ok(report)
    }

    /// Merges already-opened containers into an arbitrary seekable writer.
    ///
    /// Returns the writer positioned after the finished container, together
    /// with the merge report. `bytes_compressed` is the number of bytes the
    /// container occupies in the writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::ArchiveMerger;
    /// use jarmerge_core::NoopProgress;
    /// use jarmerge_core::container::InputContainer;
    /// use std::io::{Cursor, Write};
    /// use zip::{ZipArchive, ZipWriter, write::SimpleFileOptions};
    ///
    /// fn jar(entries: &[(&str, &str)]) -> Vec<u8> {
    ///     let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    ///     for (name, data) in entries {
    ///         zip.start_file(*name, SimpleFileOptions::default()).unwrap();
    ///         zip.write_all(data.as_bytes()).unwrap();
    ///     }
    ///     zip.finish().unwrap().into_inner()
    /// }
    ///
    /// let mut inputs = vec![
    ///     InputContainer::from_reader("first.zip", Cursor::new(jar(&[("a.txt", "A"), ("b.txt", "B")])))?,
    ///     InputContainer::from_reader("second.zip", Cursor::new(jar(&[("b.txt", "X"), ("c.txt", "C")])))?,
    /// ];
    ///
    /// let merger = ArchiveMerger::default();
    /// let (out, report) =
    ///     merger.merge_into(&mut inputs, Cursor::new(Vec::new()), &mut NoopProgress)?;
    ///
    /// let merged = ZipArchive::new(Cursor::new(out.into_inner())).unwrap();
    /// assert_eq!(merged.file_names().collect::<Vec<_>>(), vec!["a.txt", "b.txt", "c.txt"]);
    /// assert_eq!(report.skipped_entries, vec!["b.txt"]);
    /// # Ok::<(), jarmerge_core::MergeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `MalformedContainer` if an entry cannot be read, or
    /// `OutputUnwritable` if the writer fails.
    pub fn merge_into<R, W>(
        &self,
        inputs: &mut [InputContainer<R>],
        writer: W,
        progress: &mut dyn ProgressCallback,
    ) -> Result<(W, MergeReport)>
    where
        R: Read + Seek,
        W: Write + Seek,
    {
        self.config.validate()?;
        let start = Instant::now();

        let (mut writer, mut report) =
            self.stream_inputs(inputs, writer, Path::new(STREAM_OUTPUT_LABEL), progress)?;

        let output_error = |e: io::Error| MergeError::output(Path::new(STREAM_OUTPUT_LABEL), e);
        writer.flush().map_err(output_error)?;
        report.bytes_compressed = writer.stream_position().map_err(output_error)?;
        report.duration = start.elapsed();
        progress.on_complete();

        Ok((writer, report))
    }

    fn stream_inputs<R, W>(
        &self,
        inputs: &mut [InputContainer<R>],
        writer: W,
        output: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<(W, MergeReport)>
    where
        R: Read + Seek,
        W: Write + Seek,
    {
        let total_entries = inputs.iter().map(InputContainer::len).sum();
        let mut session = MergeSession::new(
            writer,
            output,
            self.config.entry_options(),
            total_entries,
            progress,
        );

        for (index, input) in inputs.iter_mut().enumerate() {
            session.append(index, input)?;
        }

        session.finish()
    }
}

/// State of one merge invocation.
///
/// The seen-name set, copy buffer and report live here and are dropped when
/// the merge returns, so no state leaks between merges.
struct MergeSession<'a, W: Write + Seek> {
    zip: ZipWriter<W>,
    output: &'a Path,
    options: SimpleFileOptions,
    seen: SeenNames,
    buffer: CopyBuffer,
    report: MergeReport,
    progress: &'a mut dyn ProgressCallback,
    total_entries: usize,
    current_entry: usize,
}

impl<'a, W: Write + Seek> MergeSession<'a, W> {
    fn new(
        writer: W,
        output: &'a Path,
        options: SimpleFileOptions,
        total_entries: usize,
        progress: &'a mut dyn ProgressCallback,
    ) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            output,
            options,
            seen: SeenNames::new(),
            buffer: CopyBuffer::new(),
            report: MergeReport::new(),
            progress,
            total_entries,
            current_entry: 0,
        }
    }

    /// Streams every entry of `input` whose name has not been written yet.
    fn append<R: Read + Seek>(&mut self, index: usize, input: &mut InputContainer<R>) -> Result<()> {
        let source = input.path().to_path_buf();
        debug!(input = %source.display(), entries = input.len(), "streaming input");
        self.progress.on_input_start(&source, index);

        let mut summary = InputSummary::new(&source);
        input.for_each_entry(|entry| self.write_entry(&source, &mut summary, entry))?;

        self.report.inputs.push(summary);
        Ok(())
    }

    fn write_entry<R: Read>(
        &mut self,
        source: &Path,
        summary: &mut InputSummary,
        entry: &mut ZipFile<'_, R>,
    ) -> Result<()> {
        let name = entry.name().to_string();
        summary.entries_read += 1;
        self.current_entry += 1;

        if !self.seen.insert(&name) {
            debug!(entry = %name, input = %source.display(), "skipping duplicate entry");
            summary.duplicates_skipped += 1;
            self.progress.on_entry_skipped(&name);
            self.report.skipped_entries.push(name);
            return Ok(());
        }

        self.progress
            .on_entry_start(&name, self.total_entries, self.current_entry);

        // A name ending in '/' may still carry bytes; those are copied as a file.
        if entry.is_dir() && entry.size() == 0 {
            self.zip
                .add_directory(name.as_str(), self.options)
                .map_err(|e| MergeError::output(self.output, zip_to_io(e)))?;
            self.report.directories_written += 1;
        } else {
            let options = self
                .options
                .large_file(entry.size() > u64::from(u32::MAX));
            self.zip
                .start_file(name.as_str(), options)
                .map_err(|e| MergeError::output(self.output, zip_to_io(e)))?;

            let mut reader = ProgressReader::new(entry, &mut *self.progress);
            let copied = copy_with_buffer(&mut reader, &mut self.zip, &mut self.buffer)
                .map_err(|e| match e {
                    CopyError::Read(err) => MergeError::MalformedContainer {
                        path: source.to_path_buf(),
                        reason: format!("failed to read entry '{name}': {err}"),
                    },
                    CopyError::Write(err) => MergeError::output(self.output, err),
                    CopyError::Overflow => MergeError::output(
                        self.output,
                        io::Error::other(format!("entry '{name}' size overflowed")),
                    ),
                })?;
            drop(reader);

            self.report.files_written += 1;
            self.report.bytes_written += copied;
        }

        summary.entries_written += 1;
        self.progress.on_entry_complete(&name);
        Ok(())
    }

    /// Writes the central directory and returns the underlying writer.
    fn finish(self) -> Result<(W, MergeReport)> {
        let writer = self
            .zip
            .finish()
            .map_err(|e| MergeError::output(self.output, zip_to_io(e)))?;
        Ok((writer, self.report))
    }
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        other => io::Error::other(other),
    }
}
