//! Command implementations
//!
//! Each command builds its text through a `render` function that takes a
//! [`HistoryClient`], so it can run against any transport.

pub mod diff;
pub mod list;
pub mod restore;

use std::env::VarError;

use dashrev_history::{ClientConfig, HistoryClient, HttpTransport};

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::error::CliResult;
use crate::output::{print_info, print_success};

/// What a command wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Printed as-is (tables, JSON, diffs).
    Text(String),
    /// A completed change.
    Success(String),
    /// Nothing happened, and why.
    Info(String),
}

impl Output {
    pub fn as_str(&self) -> &str {
        match self {
            Output::Text(s) | Output::Success(s) | Output::Info(s) => s,
        }
    }

    pub fn print(&self) {
        match self {
            Output::Text(text) => println!("{}", text.trim_end()),
            Output::Success(message) => print_success(message),
            Output::Info(message) => print_info(message),
        }
    }
}

/// Resolve client settings: command-line flags first, then `env`.
///
/// The CLI always checks restore versions strictly so bad input is
/// reported rather than silently ignored.
pub fn load_config<F>(global: &GlobalArgs, env: F) -> CliResult<ClientConfig>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let config = ClientConfig::from_reader(|key| {
        let flag = match key {
            "DASHREV_API_URL" => global.api_url.as_ref(),
            "DASHREV_API_TOKEN" => global.token.as_ref(),
            _ => None,
        };
        match flag {
            Some(value) => Ok(value.clone()),
            None => env(key),
        }
    })?;

    Ok(config.with_strict_versions(true))
}

/// Build the HTTP client from flags and the process environment.
pub fn build_client(global: &GlobalArgs) -> CliResult<HistoryClient<HttpTransport>> {
    let config = load_config(global, |key| std::env::var(key))?;
    tracing::debug!(?config, "client configuration loaded");
    Ok(HistoryClient::from_config(&config)?)
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::List(args) => list::execute(args, &cli.global).await,
        Commands::Diff(args) => diff::execute(args, &cli.global).await,
        Commands::Restore(args) => restore::execute(args, &cli.global).await,
    }
}
