//! Diff command: compare two versions of a dashboard

use clap::Args;
use dashrev_history::{CompareSelector, DashboardRef, DiffView, HistoryClient, Transport};

use super::{build_client, Output};
use crate::cli::GlobalArgs;
use crate::error::CliResult;
use crate::output::format_diff;

/// Arguments for the diff command
#[derive(Args, Debug, Clone)]
#[command(long_about = "Compare two saved versions of a dashboard.\n\n\
    Examples:\n\
      dashrev diff -d 42 3 5              # rendered diff of version 3 against 5\n\
      dashrev diff -d 42 3 5 --view json  # structured delta")]
pub struct DiffArgs {
    /// Dashboard id (omit for a dashboard that has not been saved)
    #[arg(long, short = 'd', value_name = "ID")]
    pub dashboard: Option<i64>,

    /// Base version
    pub original: u32,

    /// Version compared against the base
    pub new: u32,

    /// Diff representation: html, json or basic
    #[arg(long, default_value = "html")]
    pub view: DiffView,
}

/// Execute the diff command
pub async fn execute(args: DiffArgs, global: &GlobalArgs) -> CliResult<()> {
    let client = build_client(global)?;
    render(&client, &args).await?.print();
    Ok(())
}

/// Fetch the comparison and format it.
pub async fn render<T: Transport>(client: &HistoryClient<T>, args: &DiffArgs) -> CliResult<Output> {
    let dashboard = DashboardRef::from(args.dashboard);
    let selector = CompareSelector::new(args.original, args.new);

    let diff = client
        .compare_versions(&dashboard, &selector, args.view)
        .await?;

    if diff.is_empty() {
        return Ok(Output::Info("No differences available.".to_string()));
    }

    Ok(Output::Text(format_diff(&diff)?))
}
