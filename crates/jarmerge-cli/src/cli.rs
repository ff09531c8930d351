//! CLI argument parsing using clap.

use clap::Parser;
use jarmerge_core::MergeConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jarmerge")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Entries of CONTAINER1 win over same-named entries of CONTAINER2."
)]
pub struct Cli {
    /// Container whose entries take precedence
    #[arg(value_name = "CONTAINER1")]
    pub container1: PathBuf,

    /// Container whose entries fill in names missing from CONTAINER1
    #[arg(value_name = "CONTAINER2")]
    pub container2: PathBuf,

    /// Merged output container (created or replaced)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Store entries without compression
    #[arg(long, conflicts_with = "compression_level")]
    pub store: bool,

    /// Write the output in place instead of via a temporary file
    #[arg(long)]
    pub no_atomic: bool,
}

impl Cli {
    /// Builds the merge configuration from the command-line flags.
    pub fn merge_config(&self) -> MergeConfig {
        let mut config = MergeConfig::default()
            .with_store_only(self.store)
            .with_atomic(!self.no_atomic);
        if let Some(level) = self.compression_level {
            config = config.with_compression_level(level);
        }
        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_three_positionals() {
        let cli = Cli::try_parse_from(["jarmerge", "a.jar", "b.jar", "out.jar"]).unwrap();
        assert_eq!(cli.container1, PathBuf::from("a.jar"));
        assert_eq!(cli.container2, PathBuf::from("b.jar"));
        assert_eq!(cli.output, PathBuf::from("out.jar"));

        let config = cli.merge_config();
        assert_eq!(config.compression_level, MergeConfig::default().compression_level);
        assert!(config.atomic);
        assert!(!config.store_only);
    }

    #[test]
    fn test_wrong_positional_count_rejected() {
        for args in [
            vec!["jarmerge"],
            vec!["jarmerge", "a.jar"],
            vec!["jarmerge", "a.jar", "b.jar"],
        ] {
            let err = Cli::try_parse_from(args).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }

        let err = Cli::try_parse_from(["jarmerge", "a.jar", "b.jar", "out.jar", "extra.jar"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_merge_config_flags() {
        let cli = Cli::try_parse_from([
            "jarmerge", "-l", "9", "--no-atomic", "a.jar", "b.jar", "out.jar",
        ])
        .unwrap();
        let config = cli.merge_config();
        assert_eq!(config.compression_level, Some(9));
        assert!(!config.atomic);

        let cli = Cli::try_parse_from(["jarmerge", "--store", "a.jar", "b.jar", "out.jar"]).unwrap();
        assert!(cli.merge_config().store_only);
    }

    #[test]
    fn test_compression_level_range() {
        assert!(Cli::try_parse_from(["jarmerge", "-l", "0", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["jarmerge", "-l", "10", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_conflicting_flags() {
        assert!(Cli::try_parse_from(["jarmerge", "-v", "-q", "a", "b", "c"]).is_err());
        assert!(Cli::try_parse_from(["jarmerge", "--store", "-l", "3", "a", "b", "c"]).is_err());
    }
}
