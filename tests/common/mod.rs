//! Common helpers for provider integration tests

use wiremock::ResponseTemplate;

/// Plain client, no timeout needed against a local mock server
pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// A 200 response carrying a canned JSON body
pub fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}
