//! Integration tests for the Pexels provider against a local mock server

mod common;

use common::{http_client, json_response};
use pixfind::search::providers::PexelsProvider;
use pixfind::search::{ImageProvider, SearchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = r#"{
  "page": 1,
  "photos": [
    {
      "id": 2014422,
      "photographer": "Joey Farina",
      "url": "https://www.pexels.com/photo/2014422/",
      "src": {"original": "https://images.test/2014422?orig", "large": "https://images.test/2014422-large.jpg"},
      "alt": ""
    }
  ]
}"#;

#[tokio::test]
async fn test_search_sends_raw_key_header_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("query", "sunset"))
        .and(query_param("per_page", "12"))
        .and(header("Authorization", "test-key"))
        .respond_with(json_response(FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        PexelsProvider::new(http_client(), "test-key".to_string()).with_api_base(server.uri());

    let records = provider.search("sunset").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "2014422");
    assert_eq!(records[0].url, "https://images.test/2014422-large.jpg");
    // Empty alt falls back to the query text.
    assert_eq!(records[0].alt_text, "sunset");
    assert_eq!(records[0].attribution, "Joey Farina");
    assert_eq!(records[0].original_url, "https://www.pexels.com/photo/2014422/");
    assert_eq!(records[0].source_name, "Pexels");
}

#[tokio::test]
async fn test_zero_hits_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(json_response(r#"{"page": 1, "photos": []}"#))
        .mount(&server)
        .await;

    let provider =
        PexelsProvider::new(http_client(), "test-key".to_string()).with_api_base(server.uri());

    let records = provider.search("nothing matches this").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider =
        PexelsProvider::new(http_client(), "test-key".to_string()).with_api_base(server.uri());

    let err = provider.search("sunset").await.unwrap_err();
    match err {
        SearchError::RequestFailed { provider, status } => {
            assert_eq!(provider, "Pexels");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}
