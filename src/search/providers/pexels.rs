use crate::search::{ImageProvider, ImageRecord, ProviderId, SearchError, RESULTS_PER_SEARCH};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.pexels.com";

/// Pexels photo search
///
/// Authenticates with an opaque API key in the `Authorization` header.
/// Documentation: https://www.pexels.com/api/documentation/
pub struct PexelsProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl PexelsProvider {
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
impl ImageProvider for PexelsProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Pexels
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageRecord>, SearchError> {
        let provider = self.id().display_name();
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey { provider });
        }

        let url = format!("{}/v1/search", self.api_base);
        let per_page = RESULTS_PER_SEARCH.to_string();

        tracing::debug!(query = %query, "performing pexels search");

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "pexels api error");
            return Err(SearchError::RequestFailed { provider, status });
        }

        let body = response.text().await?;
        let payload: SearchResponse = serde_json::from_str(&body)
            .map_err(|source| SearchError::MalformedResponse { provider, source })?;

        let records = normalize(payload, query);
        tracing::debug!(query = %query, result_count = records.len(), "pexels search completed");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: u64,
    src: PhotoSrc,
    alt: Option<String>,
    photographer: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    large: String,
}

fn normalize(payload: SearchResponse, query: &str) -> Vec<ImageRecord> {
    payload
        .photos
        .into_iter()
        .map(|photo| ImageRecord {
            id: photo.id.to_string(),
            url: photo.src.large,
            alt_text: photo
                .alt
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| query.to_string()),
            attribution: photo.photographer,
            original_url: photo.url,
            source_name: ProviderId::Pexels.display_name().to_string(),
        })
        .collect()
}
