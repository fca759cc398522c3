//! Integration tests for the Freepik provider against a local mock server

mod common;

use common::{http_client, json_response};
use pixfind::search::providers::FreepikProvider;
use pixfind::search::ImageProvider;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_search_sends_key_and_locale_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/resources"))
        .and(query_param("locale", "en-US"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .and(query_param("term", "office desk"))
        .and(header("x-freepik-api-key", "test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(json_response(
            r#"{"data": [
                {"id": 9001,
                 "title": "Modern office desk",
                 "url": "https://www.freepik.com/photo/9001",
                 "author": {"name": "studiofour"},
                 "images": {"large": "https://img.test/9001-large.jpg"}}
            ]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        FreepikProvider::new(http_client(), "test-key".to_string()).with_api_base(server.uri());

    let records = provider.search("office desk").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "9001");
    assert_eq!(records[0].url, "https://img.test/9001-large.jpg");
    assert_eq!(records[0].alt_text, "Modern office desk");
    assert_eq!(records[0].attribution, "studiofour");
    assert_eq!(records[0].original_url, "https://www.freepik.com/photo/9001");
    assert_eq!(records[0].source_name, "Freepik");
}

#[tokio::test]
async fn test_payload_without_data_field_is_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/resources"))
        .respond_with(json_response(r#"{"meta": {"total": 0, "per_page": 12}}"#))
        .mount(&server)
        .await;

    let provider =
        FreepikProvider::new(http_client(), "test-key".to_string()).with_api_base(server.uri());

    // Missing `data` is a valid empty answer, not an error.
    let records = provider.search("anything").await.unwrap();
    assert!(records.is_empty());
}
