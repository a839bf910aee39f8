//! Dashboard version history client.

use futures_util::future::{self, BoxFuture, FutureExt};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::http::HttpTransport;
use crate::models::{
    CompareSelector, DashboardRef, DiffView, HistoryListOptions, Record, RevisionSummary,
    VersionDiff,
};
use crate::transport::{immediate, Transport};

/// How [`HistoryClient::restore_version_value`] treats a version that is
/// not a JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionCheck {
    /// Resolve to the empty record, as if nothing was asked.
    #[default]
    Lenient,
    /// Fail with [`HistoryError::InvalidVersion`].
    Strict,
}

/// Lists, compares and restores dashboard versions through a [`Transport`].
///
/// Holds no state besides its transport. A dashboard without identity
/// never reaches the transport: each operation resolves at once to an
/// empty value of the same type the remote call would produce.
#[derive(Debug, Clone)]
pub struct HistoryClient<T> {
    transport: T,
    version_check: VersionCheck,
}

impl<T: Transport> HistoryClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            version_check: VersionCheck::default(),
        }
    }

    /// Choose how untyped restore versions are validated.
    pub fn with_version_check(mut self, version_check: VersionCheck) -> Self {
        self.version_check = version_check;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn version_check(&self) -> VersionCheck {
        self.version_check
    }

    /// List the stored versions of a dashboard.
    ///
    /// `GET api/dashboards/db/{id}/versions` with `options` as query.
    /// Resolves to an empty list for an unsaved dashboard.
    pub fn list_history(
        &self,
        dashboard: &DashboardRef,
        options: &HistoryListOptions,
    ) -> BoxFuture<'_, HistoryResult<Vec<RevisionSummary>>> {
        let Some(id) = dashboard.identity() else {
            debug!("dashboard not saved, no version history");
            return immediate(Vec::new());
        };

        let path = format!("api/dashboards/db/{id}/versions");
        debug!(dashboard_id = id, %path, "listing dashboard versions");
        self.transport.get(path, options.to_query())
    }

    /// Compare two versions using the default `html` view.
    pub fn compare_versions_default(
        &self,
        dashboard: &DashboardRef,
        selector: &CompareSelector,
    ) -> BoxFuture<'_, HistoryResult<VersionDiff>> {
        self.compare_versions(dashboard, selector, DiffView::default())
    }

    /// Compare two versions of a dashboard.
    ///
    /// `GET api/dashboards/db/{id}/compare/{original}...{new}/{view}`.
    /// Resolves to the empty record for an unsaved dashboard.
    pub fn compare_versions(
        &self,
        dashboard: &DashboardRef,
        selector: &CompareSelector,
        view: DiffView,
    ) -> BoxFuture<'_, HistoryResult<VersionDiff>> {
        let Some(id) = dashboard.identity() else {
            debug!("dashboard not saved, nothing to compare");
            return immediate(VersionDiff::default());
        };

        let path = format!(
            "api/dashboards/db/{id}/compare/{}/{}",
            selector.range(),
            view
        );
        debug!(dashboard_id = id, %path, "comparing dashboard versions");
        self.transport.get(path, Vec::new())
    }

    /// Restore a dashboard to `version`.
    ///
    /// `POST api/dashboards/db/{id}/restore` with `{"version": version}`.
    /// This mutates the remote dashboard. Resolves to the empty record for
    /// an unsaved dashboard.
    pub fn restore_version(
        &self,
        dashboard: &DashboardRef,
        version: u32,
    ) -> BoxFuture<'_, HistoryResult<Record>> {
        match dashboard.identity() {
            Some(id) => self.post_restore(id, Value::from(version)),
            None => {
                debug!("dashboard not saved, nothing to restore");
                immediate(Record::new())
            }
        }
    }

    /// Restore from a version that arrived as untyped JSON.
    ///
    /// The request is only sent when the dashboard has an identity and
    /// `version` is a JSON number; the number is forwarded as given.
    /// Otherwise the call resolves to the empty record, except that a
    /// non-numeric version fails under [`VersionCheck::Strict`].
    pub fn restore_version_value(
        &self,
        dashboard: &DashboardRef,
        version: &Value,
    ) -> BoxFuture<'_, HistoryResult<Record>> {
        match (dashboard.identity(), version.is_number()) {
            (Some(id), true) => self.post_restore(id, version.clone()),
            (Some(_), false) if self.version_check == VersionCheck::Strict => {
                future::err(HistoryError::InvalidVersion(format!(
                    "expected a number, got {version}"
                )))
                .boxed()
            }
            _ => {
                debug!(%version, "restore skipped");
                immediate(Record::new())
            }
        }
    }

    fn post_restore(&self, id: i64, version: Value) -> BoxFuture<'_, HistoryResult<Record>> {
        let path = format!("api/dashboards/db/{id}/restore");
        debug!(dashboard_id = id, %path, %version, "restoring dashboard version");
        self.transport.post(path, json!({ "version": version }))
    }
}

impl HistoryClient<HttpTransport> {
    /// Build an HTTP-backed client from configuration.
    pub fn from_config(config: &ClientConfig) -> HistoryResult<Self> {
        let version_check = if config.strict_versions {
            VersionCheck::Strict
        } else {
            VersionCheck::Lenient
        };
        Ok(Self::new(HttpTransport::new(config)?).with_version_check(version_check))
    }
}
