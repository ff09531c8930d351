//! Fixed-buffer payload copy.
//!
//! Entry payloads are streamed through a single reusable buffer so memory
//! use stays constant regardless of entry or container size. Read and write
//! failures are reported separately: a failed read means the source
//! container is corrupt, a failed write means the output cannot be written.

use std::io;
use std::io::Read;
use std::io::Write;

use thiserror::Error;

/// Buffer size for payload copies (64KB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for entry payload copies.
///
/// One buffer is allocated per merge and shared by every entry.
///
/// # Examples
///
/// ```
/// use jarmerge_core::copy::{CopyBuffer, copy_with_buffer};
/// use std::io::Cursor;
///
/// let mut buffer = CopyBuffer::new();
/// let mut input = Cursor::new(b"payload".to_vec());
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 7);
/// assert_eq!(output, b"payload");
/// # Ok::<(), jarmerge_core::copy::CopyError>(())
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure while copying a payload.
#[derive(Error, Debug)]
pub enum CopyError {
    /// Reading from the source failed.
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing to the destination failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// Total byte count exceeded `u64::MAX`.
    #[error("copied byte count overflowed")]
    Overflow,
}

/// Copies all data from `reader` to `writer` through `buffer`.
///
/// Interrupted reads are retried. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns `CopyError::Read` or `CopyError::Write` for the failing side,
/// or `CopyError::Overflow` if the byte count would overflow `u64`.
#[inline]
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, CopyError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or(CopyError::Overflow)?;
    }

    Ok(total)
}
