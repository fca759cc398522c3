use crate::search::{ImageProvider, ImageRecord, ProviderId, SearchError, RESULTS_PER_SEARCH};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://pixabay.com";

/// Pixabay image search
///
/// The API key travels as a query parameter rather than a header, so request
/// URLs must be redacted before logging. The `user` field is a raw username,
/// not a display name.
/// Documentation: https://pixabay.com/api/docs/
pub struct PixabayProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl PixabayProvider {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the provider at a different endpoint (used by tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait::async_trait]
impl ImageProvider for PixabayProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Pixabay
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageRecord>, SearchError> {
        let provider = self.id().display_name();
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey { provider });
        }

        let url = format!("{}/api/", self.api_base);
        let per_page = RESULTS_PER_SEARCH.to_string();

        tracing::debug!(query = %query, "performing pixabay search");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_key_params(&error_text),
                "pixabay api error"
            );
            return Err(SearchError::RequestFailed { provider, status });
        }

        let body = response.text().await?;
        let payload: SearchResponse = serde_json::from_str(&body)
            .map_err(|source| SearchError::MalformedResponse { provider, source })?;

        let records = normalize(payload, query);
        tracing::debug!(query = %query, result_count = records.len(), "pixabay search completed");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(default)]
    tags: String,
    user: String,
    #[serde(rename = "pageURL")]
    page_url: String,
}

fn normalize(payload: SearchResponse, query: &str) -> Vec<ImageRecord> {
    payload
        .hits
        .into_iter()
        .map(|hit| ImageRecord {
            id: hit.id.to_string(),
            url: hit.webformat_url,
            alt_text: if hit.tags.is_empty() {
                query.to_string()
            } else {
                hit.tags
            },
            attribution: hit.user,
            original_url: hit.page_url,
            source_name: ProviderId::Pixabay.display_name().to_string(),
        })
        .collect()
}
