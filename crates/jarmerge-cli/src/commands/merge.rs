//! Merge command implementation.

use crate::cli::Cli;
use crate::error::add_merge_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use jarmerge_core::NoopProgress;
use jarmerge_core::merge_archives_with_progress;
use std::path::Path;
use tracing::debug;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = cli.merge_config();
    debug!(?config, "merge configuration");

    if same_file(&cli.container1, &cli.container2) {
        formatter.format_warning(&format!(
            "'{}' and '{}' are the same file; the output will equal the input",
            cli.container1.display(),
            cli.container2.display()
        ));
    }

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if !cli.quiet && !cli.json && CliProgress::should_show() {
        let mut progress = CliProgress::new();
        add_merge_context(merge_archives_with_progress(
            &cli.container1,
            &cli.container2,
            &cli.output,
            &config,
            &mut progress,
        ))?
    } else {
        let mut noop = NoopProgress;
        add_merge_context(merge_archives_with_progress(
            &cli.container1,
            &cli.container2,
            &cli.output,
            &config,
            &mut noop,
        ))?
    };

    formatter.format_merge_result(&cli.output, &report)?;

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
