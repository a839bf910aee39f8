//! Request and response shapes for the version history API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Free-form JSON object, used for restore responses.
pub type Record = Map<String, Value>;

/// Reference to the dashboard whose history is being queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRef {
    /// Database id. `None` for a dashboard that has never been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl DashboardRef {
    /// A dashboard that exists on the server.
    pub fn saved(id: i64) -> Self {
        Self { id: Some(id) }
    }

    /// A dashboard that has not been persisted yet.
    pub fn unsaved() -> Self {
        Self { id: None }
    }

    /// The usable identity of this dashboard.
    ///
    /// Id `0` is never assigned by the server and counts as no identity.
    pub fn identity(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }
}

impl From<Option<i64>> for DashboardRef {
    fn from(id: Option<i64>) -> Self {
        Self { id }
    }
}

/// Query parameters forwarded verbatim to the version list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryListOptions {
    /// Maximum number of versions to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Number of versions to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,

    /// Any other parameter (paging, ordering, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl HistoryListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Add an arbitrary parameter.
    ///
    /// Numeric `limit` and `start` values set the named fields, replacing
    /// any earlier value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let (key, value) = (key.into(), value.into());
        match (key.as_str(), value.trim().parse::<u32>()) {
            ("limit", Ok(limit)) => self.limit = Some(limit),
            ("start", Ok(start)) => self.start = Some(start),
            _ => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// Flatten into query pairs: `limit`, `start`, then extras by key.
    ///
    /// Each key appears once; a named field wins over an extra of the
    /// same name.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.extra.len() + 2);
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(start) = self.start {
            params.push(("start".to_string(), start.to_string()));
        }
        params.extend(
            self.extra
                .iter()
                .filter(|(k, _)| match k.as_str() {
                    "limit" => self.limit.is_none(),
                    "start" => self.start.is_none(),
                    _ => true,
                })
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params
    }
}

/// The pair of revisions to compare.
///
/// Which side is the base is decided by the field names alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSelector {
    pub original: u32,
    pub new: u32,
}

impl CompareSelector {
    pub fn new(original: u32, new: u32) -> Self {
        Self { original, new }
    }

    /// Path segment `{original}...{new}`.
    pub fn range(&self) -> String {
        format!("{}...{}", self.original, self.new)
    }
}

/// Representation requested from the compare endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffView {
    /// Rendered markup of the full diff.
    #[default]
    Html,
    /// Machine-readable delta.
    Json,
    /// Rendered markup, summary only.
    Basic,
}

impl DiffView {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffView::Html => "html",
            DiffView::Json => "json",
            DiffView::Basic => "basic",
        }
    }
}

impl fmt::Display for DiffView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(DiffView::Html),
            "json" => Ok(DiffView::Json),
            "basic" => Ok(DiffView::Basic),
            other => Err(format!(
                "unknown diff view '{other}' (expected html, json or basic)"
            )),
        }
    }
}

/// One entry of a dashboard's version history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSummary {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub dashboard_id: i64,

    #[serde(default)]
    pub parent_version: u32,

    /// Version this one was restored from, `0` when not a restore.
    #[serde(default)]
    pub restored_from: u32,

    #[serde(default)]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub message: String,

    /// Fields not modeled above, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RevisionSummary {
    /// Whether this version was produced by a restore.
    pub fn is_restore(&self) -> bool {
        self.restored_from != 0
    }
}

/// Body returned by the compare endpoint.
///
/// The markup views answer with text, the json view with a structured
/// delta. The default value is the empty record, meaning "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionDiff {
    Markup(String),
    Delta(Map<String, Value>),
    Other(Value),
}

impl Default for VersionDiff {
    fn default() -> Self {
        VersionDiff::Delta(Map::new())
    }
}

impl VersionDiff {
    /// True for the empty record and for blank markup.
    pub fn is_empty(&self) -> bool {
        match self {
            VersionDiff::Markup(text) => text.trim().is_empty(),
            VersionDiff::Delta(map) => map.is_empty(),
            VersionDiff::Other(value) => value.is_null(),
        }
    }
}
