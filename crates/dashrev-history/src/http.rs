//! HTTP transport (reqwest-based).
//!
//! Sends history requests to the versioning API root configured in
//! [`ClientConfig`]. No retries and no token refresh: a failed request
//! is reported once, as-is.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{HistoryError, HistoryResult};
use crate::transport::Transport;

const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: Url,
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("api_url", &self.api_url.as_str())
            .field("authenticated", &self.api_token.is_some())
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport from configuration.
    pub fn new(config: &ClientConfig) -> HistoryResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("dashrev/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HistoryError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(config, client))
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_http_client(config: &ClientConfig, client: Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Resolve a relative API path against the root.
    fn url(&self, path: &str) -> HistoryResult<Url> {
        self.api_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HistoryError::Config(format!("Invalid request path '{path}': {e}")))
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(ACCEPT, ACCEPT_VALUE);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> HistoryResult<T> {
        let response = builder.send().await?;
        let value = Self::handle_response(response).await?;
        serde_json::from_value(value).map_err(Into::into)
    }

    async fn handle_response(response: Response) -> HistoryResult<Value> {
        let status = response.status();
        trace!(status = status.as_u16(), url = %response.url(), "response received");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HistoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        let body = response.text().await?;
        decode_body(&body, content_type.as_deref())
    }
}

/// Turn a response body into JSON.
///
/// JSON content types are parsed, other content types (rendered diffs)
/// become a JSON string. Without a content type the body is parsed if it
/// is valid JSON and kept as text otherwise.
fn decode_body(body: &str, content_type: Option<&str>) -> HistoryResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    match content_type {
        Some(ct) if ct.contains("json") => serde_json::from_str(body).map_err(Into::into),
        Some(_) => Ok(Value::String(body.to_string())),
        None => Ok(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get<T>(&self, path: String, params: Vec<(String, String)>) -> HistoryResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(&path)?;
        debug!(method = "GET", %url, params = params.len(), "sending request");

        let mut builder = self.request(self.client.get(url));
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        self.send(builder).await
    }

    async fn post<T>(&self, path: String, body: Value) -> HistoryResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(&path)?;
        debug!(method = "POST", %url, "sending request");

        let builder = self.request(self.client.post(url)).json(&body);
        self.send(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transport(api_url: &str) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new(api_url).unwrap()).unwrap()
    }

    #[test]
    fn test_url_joins_under_api_root() {
        let transport = transport("https://grafana.example.com/sub");
        let url = transport.url("api/dashboards/db/7/versions").unwrap();
        assert_eq!(
            url.as_str(),
            "https://grafana.example.com/sub/api/dashboards/db/7/versions"
        );

        let url = transport.url("/api/dashboards/db/7/restore").unwrap();
        assert_eq!(
            url.as_str(),
            "https://grafana.example.com/sub/api/dashboards/db/7/restore"
        );
    }

    #[test]
    fn test_compare_range_survives_join() {
        let transport = transport("http://localhost:3000");
        let url = transport
            .url("api/dashboards/db/7/compare/3...5/html")
            .unwrap();
        assert_eq!(url.path(), "/api/dashboards/db/7/compare/3...5/html");
    }

    #[test]
    fn test_decode_body_by_content_type() {
        assert_eq!(
            decode_body(r#"{"a":1}"#, Some("application/json; charset=utf-8")).unwrap(),
            json!({"a": 1})
        );
        assert_eq!(
            decode_body("<p>diff</p>", Some("text/html; charset=utf-8")).unwrap(),
            json!("<p>diff</p>")
        );
        assert_eq!(decode_body("[1,2]", None).unwrap(), json!([1, 2]));
        assert_eq!(decode_body("plain", None).unwrap(), json!("plain"));
        assert_eq!(decode_body("  ", Some("application/json")).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_body_rejects_broken_json() {
        let err = decode_body("{oops", Some("application/json")).unwrap_err();
        assert!(matches!(err, HistoryError::Decode(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_api_token("glsa_secret");
        let transport = HttpTransport::new(&config).unwrap();
        let debug = format!("{transport:?}");
        assert!(!debug.contains("glsa_secret"));
        assert!(debug.contains("authenticated: true"));
    }
}
