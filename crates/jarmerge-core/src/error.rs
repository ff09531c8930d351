//! Error types for container merge operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `MergeError`.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors that can occur while merging containers.
///
/// Skipping an entry whose name was already written is normal control flow
/// and never produces an error.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Input container does not exist.
    #[error("input container not found: {path}")]
    InputNotFound {
        /// The missing input path.
        path: PathBuf,
    },

    /// Input container exists but could not be opened or read.
    #[error("cannot read input container {path}: {source}")]
    InputUnreadable {
        /// The input path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Input could not be parsed as a container entry sequence.
    #[error("malformed container {path}: {reason}")]
    MalformedContainer {
        /// The offending input path.
        path: PathBuf,
        /// What the parser rejected.
        reason: String,
    },

    /// Output container could not be created or written.
    #[error("cannot write output container {path}: {source}")]
    OutputUnwritable {
        /// The output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Output path refers to one of the inputs while writing in place.
    #[error("output container {path} is also an input")]
    OutputAliasesInput {
        /// The aliased path.
        path: PathBuf,
    },

    /// Compression level outside the supported 1-9 range.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl MergeError {
    /// Returns `true` if the error was caused by one of the input containers.
    ///
    /// Input errors are detected before any output is written, except for
    /// payload corruption found while streaming.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::MergeError;
    /// use std::path::PathBuf;
    ///
    /// let err = MergeError::InputNotFound {
    ///     path: PathBuf::from("missing.jar"),
    /// };
    /// assert!(err.is_input_error());
    /// assert!(!err.is_output_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::InputUnreadable { .. }
                | Self::MalformedContainer { .. }
        )
    }

    /// Returns `true` if the error concerns the output container.
    #[must_use]
    pub const fn is_output_error(&self) -> bool {
        matches!(
            self,
            Self::OutputUnwritable { .. } | Self::OutputAliasesInput { .. }
        )
    }

    /// Returns the container path the error refers to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::MergeError;
    /// use std::path::Path;
    ///
    /// let err = MergeError::MalformedContainer {
    ///     path: "broken.jar".into(),
    ///     reason: "invalid central directory".to_string(),
    /// };
    /// assert_eq!(err.path(), Some(Path::new("broken.jar")));
    ///
    /// let err = MergeError::InvalidCompressionLevel { level: 0 };
    /// assert_eq!(err.path(), None);
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InputNotFound { path }
            | Self::InputUnreadable { path, .. }
            | Self::MalformedContainer { path, .. }
            | Self::OutputUnwritable { path, .. }
            | Self::OutputAliasesInput { path } => Some(path),
            Self::InvalidCompressionLevel { .. } => None,
        }
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarmerge_core::MergeError;
    ///
    /// let err = MergeError::MalformedContainer {
    ///     path: "a.jar".into(),
    ///     reason: "bad header".to_string(),
    /// };
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::MalformedContainer { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Classifies a failure to open an input file.
    pub(crate) fn from_input_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::InputUnreadable {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    /// Classifies a container parse failure reported by the zip reader.
    pub(crate) fn from_zip(path: &Path, err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(source) => Self::InputUnreadable {
                path: path.to_path_buf(),
                source,
            },
            other => Self::MalformedContainer {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }

    pub(crate) fn output(path: &Path, source: std::io::Error) -> Self {
        Self::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        }
    }
}
