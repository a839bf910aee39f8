//! Integration tests for the history client over HTTP using wiremock.
//!
//! Covers the three history endpoints, query/body forwarding, diff body
//! decoding, authentication, and error propagation.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashrev_history::{
    ClientConfig, CompareSelector, DashboardRef, DiffView, HistoryClient, HistoryError,
    HistoryListOptions, HttpTransport, VersionDiff,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_client(server: &MockServer) -> HistoryClient<HttpTransport> {
    let config = ClientConfig::new(&server.uri()).unwrap();
    HistoryClient::new(HttpTransport::new(&config).unwrap())
}

fn versions_body() -> serde_json::Value {
    json!([
        {
            "id": 3,
            "dashboardId": 42,
            "parentVersion": 2,
            "restoredFrom": 0,
            "version": 3,
            "created": "2017-06-08T17:24:33Z",
            "createdBy": "admin",
            "message": "Add latency panel"
        },
        {
            "id": 2,
            "dashboardId": 42,
            "parentVersion": 1,
            "restoredFrom": 0,
            "version": 2,
            "created": "2017-06-07T09:00:00Z",
            "createdBy": "editor",
            "message": ""
        }
    ])
}

// =============================================================================
// List History
// =============================================================================

#[tokio::test]
async fn test_list_history_sends_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/42/versions"))
        .and(query_param("limit", "10"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(versions_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let versions = client
        .list_history(
            &DashboardRef::saved(42),
            &HistoryListOptions::new().with_limit(10).with_start(0),
        )
        .await
        .unwrap();

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version, 3);
    assert_eq!(versions[0].message, "Add latency panel");
    assert_eq!(versions[1].created_by, "editor");
}

#[tokio::test]
async fn test_list_history_extra_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/42/versions"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let versions = client
        .list_history(
            &DashboardRef::saved(42),
            &HistoryListOptions::new().with_param("page", "1"),
        )
        .await
        .unwrap();

    assert!(versions.is_empty());
}

#[tokio::test]
async fn test_unsaved_dashboard_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(versions_body()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let dashboard = DashboardRef::unsaved();

    let versions = client
        .list_history(&dashboard, &HistoryListOptions::new())
        .await
        .unwrap();
    let diff = client
        .compare_versions_default(&dashboard, &CompareSelector::new(1, 2))
        .await
        .unwrap();
    let restored = client.restore_version(&dashboard, 1).await.unwrap();

    assert!(versions.is_empty());
    assert!(diff.is_empty());
    assert!(restored.is_empty());
}

// =============================================================================
// Compare Versions
// =============================================================================

#[tokio::test]
async fn test_compare_html_view_returns_markup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/7/compare/3...5/html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<div class=\"diff-group\">title</div>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let diff = client
        .compare_versions_default(&DashboardRef::saved(7), &CompareSelector::new(3, 5))
        .await
        .unwrap();

    assert_eq!(
        diff,
        VersionDiff::Markup("<div class=\"diff-group\">title</div>".to_string())
    );
}

#[tokio::test]
async fn test_compare_json_view_returns_delta() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/7/compare/3...5/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"title": ["Old", "New"]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let diff = client
        .compare_versions(
            &DashboardRef::saved(7),
            &CompareSelector::new(3, 5),
            DiffView::Json,
        )
        .await
        .unwrap();

    match diff {
        VersionDiff::Delta(map) => assert_eq!(map["title"], json!(["Old", "New"])),
        other => panic!("expected delta, got {other:?}"),
    }
}

// =============================================================================
// Restore Version
// =============================================================================

#[tokio::test]
async fn test_restore_posts_version_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards/db/7/restore"))
        .and(body_json(json!({"version": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slug": "service-overview",
            "status": "success",
            "version": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let record = client
        .restore_version(&DashboardRef::saved(7), 5)
        .await
        .unwrap();

    assert_eq!(record["status"], json!("success"));
    assert_eq!(record["version"], json!(9));
}

#[tokio::test]
async fn test_restore_string_version_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let record = client
        .restore_version_value(&DashboardRef::saved(7), &json!("5"))
        .await
        .unwrap();

    assert!(record.is_empty());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_bearer_token_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/1/versions"))
        .and(header("Authorization", "Bearer glsa_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri())
        .unwrap()
        .with_api_token("glsa_token");
    let client = HistoryClient::new(HttpTransport::new(&config).unwrap());

    client
        .list_history(&DashboardRef::saved(1), &HistoryListOptions::new())
        .await
        .unwrap();
}

// =============================================================================
// Error Propagation
// =============================================================================

#[tokio::test]
async fn test_not_found_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/99/versions"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("{\"message\":\"Dashboard not found\"}"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .list_history(&DashboardRef::saved(99), &HistoryListOptions::new())
        .await
        .unwrap_err();

    match err {
        HistoryError::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("Dashboard not found"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_restore_server_error_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards/db/7/restore"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .restore_version(&DashboardRef::saved(7), 2)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards/db/7/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[{", "application/json"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let err = client
        .list_history(&DashboardRef::saved(7), &HistoryListOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on port 9 on test machines.
    let config = ClientConfig::new("http://127.0.0.1:9")
        .unwrap()
        .with_timeout_secs(2)
        .unwrap();
    let client = HistoryClient::new(HttpTransport::new(&config).unwrap());

    let err = client
        .list_history(&DashboardRef::saved(1), &HistoryListOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_network());
}
