//! Integration tests using mock HTTP server
//!
//! Tests the full flow: config → ReqwestExecutor → paginated listing → ordered items

use kvconfig::config::load_config_from_str;
use kvconfig::{
    ConfigFetcher, ConfigStore, ConnectionString, ConnectionStringPool, Error, FetchOptions,
    KeyValueItem, KeyValueResponse, ReqwestExecutor,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTEXT: &str = "/app/";

fn conn(server: &MockServer) -> String {
    format!("Endpoint={};Id=it-id;Secret=c2VjcmV0", server.uri())
}

fn fetcher(server: &MockServer) -> (ConfigFetcher<ReqwestExecutor>, ConfigStore) {
    let raw = conn(server);
    let mut pool = ConnectionStringPool::new();
    pool.insert("it", ConnectionString::parse(&raw).unwrap());
    let fetcher = ConfigFetcher::new(ReqwestExecutor::new().unwrap(), pool);
    (fetcher, ConfigStore::new("it", raw))
}

fn body(items: &[KeyValueItem]) -> serde_json::Value {
    serde_json::to_value(KeyValueResponse::new(items.to_vec())).unwrap()
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_follows_next_link_across_pages() {
    let server = MockServer::start().await;
    let item1 = KeyValueItem::new(CONTEXT, "k1", "v1", "a");
    let item2 = KeyValueItem::new(CONTEXT, "k2", "v2", "b");
    let item3 = KeyValueItem::new(CONTEXT, "k3", "v3", "c");

    Mock::given(method("GET"))
        .and(path("/kv"))
        .and(query_param("key", "/app/*"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    "</kv?after=page2>; rel=\"next\", </kv?before=page0>; rel=\"prev\"",
                )
                .set_body_json(body(&[item1.clone(), item2.clone()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/kv"))
        .and(query_param("after", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(&[item3.clone()])))
        .expect(1)
        .mount(&server)
        .await;

    let (fetcher, store) = fetcher(&server);
    let result = fetcher.fetch_keys(CONTEXT, &store).await.unwrap();

    assert_eq!(result, vec![item1, item2, item3]);
}

#[tokio::test]
async fn test_multi_label_order_from_service() {
    let server = MockServer::start().await;

    // Service returns labels interleaved; the client restores requested order
    Mock::given(method("GET"))
        .and(path("/kv"))
        .and(query_param("label", "prod,default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"key": "/app/timeout", "value": "30", "label": "default"},
                {"key": "/app/timeout", "value": "10", "label": "prod"},
                {"key": "/app/name", "value": "svc", "label": null},
                {"key": "/app/retries", "value": "5", "label": "prod"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (fetcher, store) = fetcher(&server);
    let store = store.with_label("prod,default");
    let result = fetcher.fetch_keys(CONTEXT, &store).await.unwrap();

    let summary: Vec<(&str, &str, &str)> = result
        .iter()
        .map(|i| (i.relative_key(), i.label(), i.value()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("timeout", "prod", "10"),
            ("retries", "prod", "5"),
            ("timeout", "default", "30"),
        ]
    );
}

// ============================================================================
// Status Handling
// ============================================================================

#[tokio::test]
async fn test_not_found_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/kv"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such context"))
        .expect(1)
        .mount(&server)
        .await;

    let (fetcher, store) = fetcher(&server);
    let result = fetcher.fetch_keys(CONTEXT, &store).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_bad_request_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/kv"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Failed to process the request."),
        )
        .mount(&server)
        .await;

    let (fetcher, store) = fetcher(&server);
    let err = fetcher.fetch_keys(CONTEXT, &store).await.unwrap_err();

    match err {
        Error::RequestFailure { status, response } => {
            assert_eq!(status, 400);
            assert!(response.contains("HTTP 400"));
            assert!(response.contains("Failed to process the request."));
        }
        other => panic!("Expected RequestFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_page_limit_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/kv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", "</kv?after=loop>; rel=\"next\"")
                .set_body_json(json!({"items": []})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let yaml = format!(
        "stores:\n  - name: it\n    connection_string: \"{}\"\nfetch:\n  max_pages: 2\n",
        conn(&server)
    );
    let config = load_config_from_str(&yaml).unwrap();
    let fetcher = ConfigFetcher::new(
        ReqwestExecutor::with_config(config.http.client_config()).unwrap(),
        config.pool().unwrap(),
    )
    .with_options(config.fetch);

    let err = fetcher
        .fetch_keys(CONTEXT, config.store("it").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PageLimitExceeded { max_pages: 2 }));
    assert_eq!(config.fetch, FetchOptions::default().with_max_pages(2));
}
