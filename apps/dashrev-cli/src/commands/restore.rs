//! Restore command: roll a dashboard back to a previous version
//!
//! The server saves the restored content as a new version, so a restore
//! can itself be undone by restoring again.

use clap::Args;
use dashrev_history::{DashboardRef, HistoryClient, Transport, VersionCheck};
use dialoguer::Confirm;
use serde_json::Value;

use super::{build_client, Output};
use crate::cli::GlobalArgs;
use crate::error::{CliError, CliResult};

/// Arguments for the restore command
#[derive(Args, Debug, Clone)]
#[command(long_about = "Restore a dashboard to a previous version.\n\n\
    Examples:\n\
      dashrev restore -d 42 3         # restore version 3 (with confirmation)\n\
      dashrev restore -d 42 3 --yes   # restore without confirmation")]
pub struct RestoreArgs {
    /// Dashboard id (omit for a dashboard that has not been saved)
    #[arg(long, short = 'd', value_name = "ID")]
    pub dashboard: Option<i64>,

    /// Version to restore
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output the server response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Interpret the version argument as JSON, keeping non-numbers as text.
///
/// Numbers must be positive whole numbers. Anything else is passed on
/// untouched and left to the client's version check.
pub fn parse_version(raw: &str) -> CliResult<Value> {
    let trimmed = raw.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Number(n)) => match n.as_u64().filter(|v| *v > 0) {
            Some(version) => Ok(Value::from(version)),
            None => Err(CliError::Validation(format!(
                "Version must be a positive whole number, got {trimmed}"
            ))),
        },
        _ => Ok(Value::String(trimmed.to_string())),
    }
}

/// Reject a version the client would refuse, so the user is never asked
/// to confirm a restore that cannot happen.
pub fn check_version(version: &Value, check: VersionCheck) -> CliResult<()> {
    if check == VersionCheck::Strict && !version.is_number() {
        return Err(CliError::Validation(format!(
            "Version must be a number, got {version}"
        )));
    }
    Ok(())
}

/// Execute the restore command
pub async fn execute(args: RestoreArgs, global: &GlobalArgs) -> CliResult<()> {
    let version = parse_version(&args.version)?;
    let client = build_client(global)?;
    check_version(&version, client.version_check())?;

    if let (Some(id), false) = (DashboardRef::from(args.dashboard).identity(), args.yes) {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Restore dashboard {id} to version {version}? Unsaved changes will be lost."
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Restore cancelled.");
            return Ok(());
        }
    }

    render(&client, &args).await?.print();
    Ok(())
}

/// Perform the restore and describe the outcome.
pub async fn render<T: Transport>(
    client: &HistoryClient<T>,
    args: &RestoreArgs,
) -> CliResult<Output> {
    let dashboard = DashboardRef::from(args.dashboard);
    let version = parse_version(&args.version)?;

    let record = client.restore_version_value(&dashboard, &version).await?;

    if args.json {
        return Ok(Output::Text(serde_json::to_string_pretty(&record)?));
    }

    if record.is_empty() {
        return Ok(Output::Info(
            "Nothing restored: the dashboard has not been saved.".to_string(),
        ));
    }

    let saved_as = record
        .get("version")
        .map(|v| format!(" (saved as version {v})"))
        .unwrap_or_default();
    Ok(Output::Success(format!(
        "Dashboard restored to version {version}{saved_as}"
    )))
}
