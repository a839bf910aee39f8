//! Terminal output helpers for consistent CLI formatting

use dashrev_history::{RevisionSummary, VersionDiff};

use crate::error::CliResult;

/// Check if color output is enabled
fn use_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message (green checkmark)
pub fn print_success(message: &str) {
    if use_color() {
        println!("\x1b[32m✓\x1b[0m {}", message);
    } else {
        println!("OK: {}", message);
    }
}

/// Print an info message (blue)
pub fn print_info(message: &str) {
    if use_color() {
        println!("\x1b[34mℹ\x1b[0m {}", message);
    } else {
        println!("Info: {}", message);
    }
}

/// Truncate a string for table display, handling Unicode safely.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Notes column for a version: restore origin, or the commit message.
pub fn version_notes(version: &RevisionSummary) -> String {
    if version.is_restore() {
        format!("Restored from version {}", version.restored_from)
    } else {
        version.message.clone()
    }
}

/// Render versions as a table.
///
/// `mark_latest` tags the first row; only meaningful when the listing
/// starts at the newest version.
pub fn format_version_table(versions: &[RevisionSummary], mark_latest: bool) -> String {
    let mut out = format!(
        "{:<8} {:<20} {:<20} {}\n",
        "VERSION", "DATE", "UPDATED BY", "NOTES"
    );
    out.push_str(&format!("{}\n", "-".repeat(80)));

    for (index, version) in versions.iter().enumerate() {
        let date = version
            .created
            .map(|created| created.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut notes = truncate(&version_notes(version), 40);
        if mark_latest && index == 0 {
            notes = if notes.is_empty() {
                "(latest)".to_string()
            } else {
                format!("{notes} (latest)")
            };
        }

        out.push_str(&format!(
            "{:<8} {:<20} {:<20} {}\n",
            version.version,
            date,
            truncate(&version.created_by, 20),
            notes
        ));
    }

    out
}

/// Render a diff for the terminal. Markup is printed as received.
pub fn format_diff(diff: &VersionDiff) -> CliResult<String> {
    match diff {
        VersionDiff::Markup(text) => Ok(text.clone()),
        VersionDiff::Delta(map) => Ok(serde_json::to_string_pretty(map)?),
        VersionDiff::Other(value) => Ok(serde_json::to_string_pretty(value)?),
    }
}
