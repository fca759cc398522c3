use crate::search::{ImageProvider, ImageRecord, ProviderId, SearchError, RESULTS_PER_SEARCH};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.freepik.com";

/// Freepik resource search
///
/// Freepik sometimes answers without a `data` field at all; that is an empty
/// result set, not an error.
pub struct FreepikProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl FreepikProvider {
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
impl ImageProvider for FreepikProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Freepik
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageRecord>, SearchError> {
        let provider = self.id().display_name();
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey { provider });
        }

        let url = format!("{}/v1/resources", self.api_base);
        let limit = RESULTS_PER_SEARCH.to_string();

        tracing::debug!(query = %query, "performing freepik search");

        let response = self
            .client
            .get(&url)
            .header("x-freepik-api-key", &self.api_key)
            .header("Accept", "application/json")
            .query(&[
                ("locale", "en-US"),
                ("page", "1"),
                ("limit", limit.as_str()),
                ("term", query),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "freepik api error");
            return Err(SearchError::RequestFailed { provider, status });
        }

        let body = response.text().await?;
        let payload: SearchResponse = serde_json::from_str(&body)
            .map_err(|source| SearchError::MalformedResponse { provider, source })?;

        let records = normalize(payload, query);
        tracing::debug!(query = %query, result_count = records.len(), "freepik search completed");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent on empty answers, hence the default
    #[serde(default)]
    data: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    id: u64,
    images: ResourceImages,
    title: Option<String>,
    author: Author,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ResourceImages {
    large: String,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: String,
}

fn normalize(payload: SearchResponse, query: &str) -> Vec<ImageRecord> {
    payload
        .data
        .into_iter()
        .map(|resource| ImageRecord {
            id: resource.id.to_string(),
            url: resource.images.large,
            alt_text: resource
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| query.to_string()),
            attribution: resource.author.name,
            original_url: resource.url,
            source_name: ProviderId::Freepik.display_name().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_field_is_empty_result() {
        let payload: SearchResponse = serde_json::from_str(r#"{"meta":{"total":0}}"#).unwrap();
        assert!(normalize(payload, "anything").is_empty());
    }
}
