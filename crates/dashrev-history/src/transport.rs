//! Network capability consumed by the history client.

use async_trait::async_trait;
use futures_util::future::{self, BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HistoryResult;

/// Issues requests against the versioning API.
///
/// Paths are relative to the API root (`api/dashboards/db/...`). Whatever
/// a transport resolves or fails with is handed to the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Read `path` with the given query pairs.
    async fn get<T>(&self, path: String, params: Vec<(String, String)>) -> HistoryResult<T>
    where
        T: DeserializeOwned + Send + 'static;

    /// Write `body` to `path`.
    async fn post<T>(&self, path: String, body: Value) -> HistoryResult<T>
    where
        T: DeserializeOwned + Send + 'static;
}

/// An already-resolved result of the same shape a transport call returns.
pub fn immediate<T>(value: T) -> BoxFuture<'static, HistoryResult<T>>
where
    T: Send + 'static,
{
    future::ok(value).boxed()
}
