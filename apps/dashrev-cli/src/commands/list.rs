//! List command: show the version history of a dashboard

use clap::Args;
use dashrev_history::{DashboardRef, HistoryClient, HistoryListOptions, Transport};

use super::{build_client, Output};
use crate::cli::GlobalArgs;
use crate::error::CliResult;
use crate::output::format_version_table;

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Dashboard id (omit for a dashboard that has not been saved)
    #[arg(long, short = 'd', value_name = "ID")]
    pub dashboard: Option<i64>,

    /// Maximum number of versions to return
    #[arg(long, default_value = "10")]
    pub limit: u32,

    /// Number of versions to skip
    #[arg(long, default_value = "0")]
    pub start: u32,

    /// Extra query parameter passed to the API (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse `key=value` into a pair.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Execute the list command
pub async fn execute(args: ListArgs, global: &GlobalArgs) -> CliResult<()> {
    let client = build_client(global)?;
    render(&client, &args).await?.print();
    Ok(())
}

/// Fetch the version list and format it.
pub async fn render<T: Transport>(client: &HistoryClient<T>, args: &ListArgs) -> CliResult<Output> {
    let dashboard = DashboardRef::from(args.dashboard);
    let options = args.params.iter().fold(
        HistoryListOptions::new()
            .with_limit(args.limit)
            .with_start(args.start),
        |options, (key, value)| options.with_param(key.as_str(), value.as_str()),
    );

    let versions = client.list_history(&dashboard, &options).await?;

    if args.json {
        return Ok(Output::Text(serde_json::to_string_pretty(&versions)?));
    }

    if versions.is_empty() {
        let message = match dashboard.identity() {
            Some(id) => format!("No versions found for dashboard {id}."),
            None => "No version history: the dashboard has not been saved.".to_string(),
        };
        return Ok(Output::Info(message));
    }

    Ok(Output::Text(format_version_table(&versions, args.start == 0)))
}
