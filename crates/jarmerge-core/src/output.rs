//! Output container targets.
//!
//! The output is either written in place or, in atomic mode, to a temporary
//! file in the same directory that is renamed over the output path only
//! after the container has been finalized. A dropped atomic target removes
//! its temporary file, so a failed merge never leaves a file claiming
//! success at the output path.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempPath;

use crate::MergeError;
use crate::Result;

const TEMP_PREFIX: &str = ".jarmerge-";
const TEMP_SUFFIX: &str = ".tmp";

/// Destination of a merge.
#[derive(Debug)]
pub struct OutputTarget {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl OutputTarget {
    /// Opens the output for writing.
    ///
    /// Returns the target together with a buffered writer over the file that
    /// will become the output.
    ///
    /// # Errors
    ///
    /// Returns `OutputUnwritable` if the file (or, in atomic mode, the
    /// temporary file in the output's directory) cannot be created.
    pub fn create(path: &Path, atomic: bool) -> Result<(Self, BufWriter<File>)> {
        if !atomic {
            let file = File::create(path).map_err(|e| MergeError::output(path, e))?;
            let target = Self {
                path: path.to_path_buf(),
                temp: None,
            };
            return Ok((target, BufWriter::new(file)));
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Same mode File::create would use before the umask.
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let (file, temp) = builder
            .tempfile_in(dir)
            .map_err(|e| MergeError::output(path, e))?
            .into_parts();

        let target = Self {
            path: path.to_path_buf(),
            temp: Some(temp),
        };
        Ok((target, BufWriter::new(file)))
    }

    /// Returns the final output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the output is committed by rename.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        self.temp.is_some()
    }

    /// Flushes the finished container and moves it into place.
    ///
    /// Returns the size of the output file in bytes.
    ///
    /// # Errors
    ///
    /// Returns `OutputUnwritable` if flushing, syncing or renaming fails.
    pub fn commit(self, writer: BufWriter<File>) -> Result<u64> {
        let file = writer
            .into_inner()
            .map_err(|e| MergeError::output(&self.path, e.into_error()))?;
        let size = file
            .metadata()
            .map_err(|e| MergeError::output(&self.path, e))?
            .len();

        if let Some(temp) = self.temp {
            file.sync_all()
                .map_err(|e| MergeError::output(&self.path, e))?;
            drop(file);
            temp.persist(&self.path)
                .map_err(|e| MergeError::output(&self.path, e.error))?;
        }

        Ok(size)
    }
}

/// Rejects an in-place output that is the same file as one of the inputs.
///
/// Truncating such an output would destroy an input before it is read.
pub(crate) fn ensure_distinct_output<'a, I>(output: &Path, inputs: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Path>,
{
    let Ok(output_canonical) = output.canonicalize() else {
        // Nothing exists at the output path yet.
        return Ok(());
    };

    for input in inputs {
        if input
            .canonicalize()
            .is_ok_and(|canonical| canonical == output_canonical)
        {
            return Err(MergeError::OutputAliasesInput {
                path: output.to_path_buf(),
            });
        }
    }
    Ok(())
}
