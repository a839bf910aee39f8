//! Command-line definition

use clap::{Args, Parser, Subcommand};

use crate::commands::diff::DiffArgs;
use crate::commands::list::ListArgs;
use crate::commands::restore::RestoreArgs;

/// dashrev - Dashboard version history
#[derive(Parser, Debug)]
#[command(name = "dashrev")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// API root of the dashboard server (overrides DASHREV_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// API token (overrides DASHREV_API_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the saved versions of a dashboard
    List(ListArgs),

    /// Compare two versions of a dashboard
    Diff(DiffArgs),

    /// Restore a dashboard to a previous version
    Restore(RestoreArgs),
}
