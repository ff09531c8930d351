//! Output formatting for merge results.
//!
//! Human output goes to the terminal with optional colors; JSON output is a
//! single document on stdout.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use json::JsonFormatter;

/// Creates an output formatter based on CLI flags.
///
/// `--json` takes precedence over `--verbose` and `--quiet`.
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose, quiet))
    }
}
