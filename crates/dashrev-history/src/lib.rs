//! # Dashboard History Client
//!
//! Client for the dashboard version history API.
//!
//! [`HistoryClient`] exposes three operations over a [`Transport`]:
//! listing the revisions of a dashboard, comparing two revisions, and
//! restoring a prior revision. A dashboard that has never been saved has
//! no identity; every operation then resolves immediately to an empty
//! result without touching the network.
//!
//! ## Example
//!
//! ```ignore
//! use dashrev_history::{ClientConfig, DashboardRef, HistoryClient, HistoryListOptions, HttpTransport};
//!
//! let config = ClientConfig::from_env()?;
//! let client = HistoryClient::new(HttpTransport::new(&config)?);
//!
//! let versions = client
//!     .list_history(&DashboardRef::saved(42), &HistoryListOptions::new().with_limit(10))
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod transport;

// Re-exports
pub use client::{HistoryClient, VersionCheck};
pub use config::{ClientConfig, ConfigError};
pub use error::{HistoryError, HistoryResult};
pub use http::HttpTransport;
pub use models::{
    CompareSelector, DashboardRef, DiffView, HistoryListOptions, Record, RevisionSummary,
    VersionDiff,
};
pub use transport::{immediate, Transport};
