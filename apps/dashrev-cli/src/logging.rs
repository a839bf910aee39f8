//! Log output setup using tracing.
//!
//! Logs go to stderr so command output on stdout stays pipeable.
//! `RUST_LOG` wins over the `-v`/`-q` flags when set.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity flags.
pub fn filter_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info,dashrev_history=debug,dashrev_cli=debug",
        (false, _) => "trace",
    }
}

/// Initialize the tracing subscriber. Safe to call more than once.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
