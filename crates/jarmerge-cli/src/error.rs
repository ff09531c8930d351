//! Error conversion utilities for CLI.
//!
//! Converts jarmerge-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use jarmerge_core::MergeError;

/// Converts `MergeError` to user-friendly anyhow error with context
pub fn convert_merge_error(err: MergeError) -> anyhow::Error {
    match err {
        MergeError::InputNotFound { path } => {
            anyhow!(
                "Input container not found: '{}'\n\
                 HINT: Check the path. Inputs are read as CONTAINER1 CONTAINER2 OUTPUT.",
                path.display()
            )
        }
        MergeError::InputUnreadable { path, source } => {
            anyhow!(
                "Cannot read input container '{}': {}\n\
                 HINT: Check that the file is readable and is not a directory.",
                path.display(),
                source
            )
        }
        MergeError::MalformedContainer { path, reason } => {
            anyhow!(
                "Malformed container '{}': {}\n\
                 HINT: The file may be corrupted or is not a JAR/ZIP container.",
                path.display(),
                reason
            )
        }
        MergeError::OutputUnwritable { path, source } => {
            anyhow!(
                "Cannot write output container '{}': {}\n\
                 HINT: Check that the output directory exists and is writable.",
                path.display(),
                source
            )
        }
        MergeError::OutputAliasesInput { path } => {
            anyhow!(
                "Output '{}' is also one of the inputs\n\
                 HINT: Choose a different output path, or drop --no-atomic.",
                path.display()
            )
        }
        MergeError::InvalidCompressionLevel { .. } => {
            anyhow::Error::from(err).context("Invalid merge configuration")
        }
    }
}

/// Adds context to a merge result
pub fn add_merge_context<T>(result: Result<T, MergeError>) -> anyhow::Result<T> {
    result.map_err(convert_merge_error)
}
