//! Streaming merger for JAR and other ZIP-family containers.
//!
//! `jarmerge-core` combines two containers into one. Entries of the first
//! input are written in their original order, followed by the entries of the
//! second input whose names are not already present. Payloads are copied
//! byte-for-byte through a fixed-size buffer, so memory use does not depend
//! on entry size.
//!
//! # Examples
//!
//! ```no_run
//! use jarmerge_core::MergeConfig;
//! use jarmerge_core::merge_archives;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::default();
//! let report = merge_archives("client.jar", "mod.jar", "merged.jar", &config)?;
//! println!(
//!     "Merged {} entries ({} duplicates skipped)",
//!     report.entries_written(),
//!     report.duplicates_skipped()
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod container;
pub mod copy;
pub mod error;
pub mod merger;
pub mod output;
pub mod progress;
pub mod report;
pub mod seen;
pub mod session;

// Re-export main API types
pub use api::merge_archives;
pub use api::merge_archives_with_progress;
pub use config::MergeConfig;
pub use container::InputContainer;
pub use error::MergeError;
pub use error::Result;
pub use merger::ArchiveMerger;
pub use output::OutputTarget;
pub use progress::NoopProgress;
pub use progress::ProgressCallback;
pub use report::InputSummary;
pub use report::MergeReport;
pub use seen::SeenNames;

// Re-export session collaborator types for easier access
pub use session::DeviceCodeNotifier;
pub use session::DeviceCodePrompt;
pub use session::SessionError;
pub use session::SessionProvider;
pub use session::SessionToken;

#[cfg(test)]
pub(crate) mod test_utils;
