//! Input containers opened for sequential entry enumeration.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use zip::ZipArchive;
use zip::read::ZipFile;
use zip::read::read_zipfile_from_stream;

use crate::MergeError;
use crate::Result;

const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const CENTRAL_HEADER_LEN: usize = 46;

/// An opened input container.
///
/// Opening parses the container's central directory, so a missing,
/// unreadable or structurally broken input is rejected here, before any
/// output exists. Entry payloads are read lazily while merging.
///
/// A container that repeats an entry name is enumerated through its local
/// headers instead of its central directory, so every occurrence is visited
/// in the order it was stored.
///
/// # Examples
///
/// ```no_run
/// use jarmerge_core::container::InputContainer;
///
/// let container = InputContainer::open("client.jar")?;
/// println!("{} has {} entries", container.path().display(), container.len());
/// # Ok::<(), jarmerge_core::MergeError>(())
/// ```
pub struct InputContainer<R> {
    path: PathBuf,
    layout: Layout<R>,
}

enum Layout<R> {
    /// One central directory record per name; entries are read by index.
    Indexed(ZipArchive<R>),
    /// Some names repeat; entries are read in local header order.
    Sequential {
        reader: R,
        start: u64,
        names: Vec<String>,
    },
}

impl InputContainer<BufReader<File>> {
    /// Opens a container file from disk.
    ///
    /// # Errors
    ///
    /// - `InputNotFound` if the path does not exist
    /// - `InputUnreadable` if it cannot be opened or read
    /// - `MalformedContainer` if it is not a ZIP-family container
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| MergeError::from_input_io(path, e))?;
        if file
            .metadata()
            .map_err(|e| MergeError::from_input_io(path, e))?
            .is_dir()
        {
            return Err(MergeError::InputUnreadable {
                path: path.to_path_buf(),
                source: std::io::Error::other("is a directory"),
            });
        }
        Self::from_reader(path, BufReader::new(file))
    }
}

impl<R: Read + Seek> InputContainer<R> {
    /// Wraps an arbitrary seekable reader, labelling it with `path` for
    /// reports and errors.
    ///
    /// # Errors
    ///
    /// Returns `MalformedContainer` if the data is not a ZIP-family container,
    /// or if it repeats an entry name and one of its entries cannot be read
    /// from the local headers.
    pub fn from_reader<P: Into<PathBuf>>(path: P, mut reader: R) -> Result<Self> {
        let path = path.into();
        let (distinct, dir_start, start) = {
            let archive =
                ZipArchive::new(&mut reader).map_err(|e| MergeError::from_zip(&path, e))?;
            (archive.len(), archive.central_directory_start(), archive.offset())
        };

        let records = count_central_records(&mut reader, dir_start)
            .map_err(|e| MergeError::from_input_io(&path, e))?;

        let layout = if records == distinct {
            Layout::Indexed(ZipArchive::new(reader).map_err(|e| MergeError::from_zip(&path, e))?)
        } else {
            let names = scan_local_entries(&path, &mut reader, start)?;
            debug!(
                input = %path.display(),
                records,
                distinct,
                "container repeats entry names, reading local headers"
            );
            Layout::Sequential {
                reader,
                start,
                names,
            }
        };

        Ok(Self { path, layout })
    }

    /// Returns the number of entries in the container, counting every
    /// occurrence of a repeated name.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.layout {
            Layout::Indexed(archive) => archive.len(),
            Layout::Sequential { names, .. } => names.len(),
        }
    }

    /// Returns `true` if the container has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns entry names in container order.
    #[must_use]
    pub fn entry_names(&self) -> Vec<&str> {
        match &self.layout {
            Layout::Indexed(archive) => (0..archive.len())
                .filter_map(|i| archive.name_for_index(i))
                .collect(),
            Layout::Sequential { names, .. } => names.iter().map(String::as_str).collect(),
        }
    }

    /// Calls `visit` for every entry, in container order.
    pub(crate) fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut ZipFile<'_, R>) -> Result<()>,
    {
        let path = &self.path;
        match &mut self.layout {
            Layout::Indexed(archive) => {
                for i in 0..archive.len() {
                    let mut entry = archive
                        .by_index(i)
                        .map_err(|e| MergeError::from_zip(path, e))?;
                    visit(&mut entry)?;
                }
            }
            Layout::Sequential { reader, start, .. } => {
                reader
                    .seek(SeekFrom::Start(*start))
                    .map_err(|e| MergeError::from_input_io(path, e))?;
                // Dropping a streamed entry skips the rest of its payload.
                while let Some(mut entry) =
                    read_zipfile_from_stream(reader).map_err(|e| malformed(path, e))?
                {
                    visit(&mut entry)?;
                }
            }
        }
        Ok(())
    }
}

impl<R> InputContainer<R> {
    /// Returns the path label of this container.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Counts the records of the central directory starting at `dir_start`,
/// including records whose name repeats an earlier one.
fn count_central_records<R: Read + Seek>(reader: &mut R, dir_start: u64) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(dir_start))?;
    let mut header = [0u8; CENTRAL_HEADER_LEN];
    let mut records = 0;

    loop {
        match reader.read_exact(&mut header) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
        let signature = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if signature != CENTRAL_HEADER_SIGNATURE {
            break;
        }
        let name_len = u16::from_le_bytes([header[28], header[29]]);
        let extra_len = u16::from_le_bytes([header[30], header[31]]);
        let comment_len = u16::from_le_bytes([header[32], header[33]]);
        let variable = i64::from(name_len) + i64::from(extra_len) + i64::from(comment_len);
        reader.seek(SeekFrom::Current(variable))?;
        records += 1;
    }

    Ok(records)
}

/// Reads every entry through its local header, checking payloads, and
/// returns the names in stored order.
fn scan_local_entries<R: Read + Seek>(path: &Path, reader: &mut R, start: u64) -> Result<Vec<String>> {
    reader
        .seek(SeekFrom::Start(start))
        .map_err(|e| MergeError::from_input_io(path, e))?;

    let mut names = Vec::new();
    while let Some(mut entry) = read_zipfile_from_stream(reader).map_err(|e| malformed(path, e))? {
        let name = entry.name().to_string();
        io::copy(&mut entry, &mut io::sink()).map_err(|e| MergeError::MalformedContainer {
            path: path.to_path_buf(),
            reason: format!("failed to read entry '{name}': {e}"),
        })?;
        names.push(name);
    }
    Ok(names)
}

fn malformed(path: &Path, err: zip::result::ZipError) -> MergeError {
    MergeError::MalformedContainer {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
