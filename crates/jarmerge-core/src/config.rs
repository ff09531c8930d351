//! Configuration for container merge operations.

use crate::MergeError;
use crate::Result;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Default deflate level used for re-encoded entries.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for container merge operations.
///
/// Controls how entries are re-encoded in the output container and how the
/// output file is committed to disk.
///
/// # Examples
///
/// ```
/// use jarmerge_core::MergeConfig;
///
/// // Deflate at level 6, atomic output
/// let config = MergeConfig::default();
///
/// let custom = MergeConfig::default()
///     .with_compression_level(9)
///     .with_atomic(false);
/// ```
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Deflate level (1-9) for output entries.
    ///
    /// `None` uses the zip writer's default level.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Write output entries without compression.
    ///
    /// When set, `compression_level` is ignored.
    ///
    /// Default: `false`.
    pub store_only: bool,

    /// Write to a temporary file beside the output and rename it into place
    /// only after the merge succeeds.
    ///
    /// A failed atomic merge leaves nothing at the output path. With
    /// `atomic = false` the output is written in place and a failed merge may
    /// leave an incomplete file behind.
    ///
    /// Default: `true`.
    pub atomic: bool,
}

impl Default for MergeConfig {
    /// Default values:
    /// - `compression_level`: `Some(6)`
    /// - `store_only`: `false`
    /// - `atomic`: `true`
    fn default() -> Self {
        Self {
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
            store_only: false,
            atomic: true,
        }
    }
}

impl MergeConfig {
    /// Creates a new `MergeConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether entries are stored uncompressed.
    #[must_use]
    pub fn with_store_only(mut self, store_only: bool) -> Self {
        self.store_only = store_only;
        self
    }

    /// Sets whether the output is committed atomically.
    #[must_use]
    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(MergeError::InvalidCompressionLevel { level });
        }
        Ok(())
    }

    /// Builds the zip writer options applied to every output entry.
    pub(crate) fn entry_options(&self) -> SimpleFileOptions {
        if self.store_only {
            return SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        }
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.compression_level.map(i64::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_config_default() {
        let config = MergeConfig::default();
        assert_eq!(config.compression_level, Some(6));
        assert!(!config.store_only);
        assert!(config.atomic);
    }

    #[test]
    fn test_merge_config_builder() {
        let config = MergeConfig::new()
            .with_compression_level(9)
            .with_store_only(true)
            .with_atomic(false);

        assert_eq!(config.compression_level, Some(9));
        assert!(config.store_only);
        assert!(!config.atomic);
    }

    #[test]
    fn test_merge_config_validate_valid() {
        assert!(MergeConfig::default().validate().is_ok());
        assert!(
            MergeConfig::default()
                .with_compression_level(1)
                .validate()
                .is_ok()
        );

        let config = MergeConfig {
            compression_level: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_config_validate_invalid() {
        for level in [0, 10, 255] {
            let config = MergeConfig {
                compression_level: Some(level),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(MergeError::InvalidCompressionLevel { level: l }) if l == level
            ));
        }
    }

    #[test]
    #[should_panic(expected = "compression level must be 1-9")]
    fn test_merge_config_builder_invalid_compression() {
        let _config = MergeConfig::default().with_compression_level(0);
    }
}
