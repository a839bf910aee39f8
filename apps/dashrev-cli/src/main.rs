//! dashrev - Command-line access to dashboard version history
//!
//! This CLI lets you:
//! - List the saved versions of a dashboard
//! - Compare two versions
//! - Restore a dashboard to an earlier version

use clap::Parser;

use dashrev_cli::cli::Cli;
use dashrev_cli::{commands, logging};

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose, cli.global.quiet);

    match commands::run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}
