use crate::search::{ImageProvider, ImageRecord, ProviderId, SearchError, RESULTS_PER_SEARCH};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.unsplash.com";

/// Unsplash photo search
///
/// Authenticates with a `Client-ID` authorization header.
/// Documentation: https://unsplash.com/documentation#search-photos
pub struct UnsplashProvider {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl UnsplashProvider {
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
impl ImageProvider for UnsplashProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Unsplash
    }

    async fn search(&self, query: &str) -> Result<Vec<ImageRecord>, SearchError> {
        let provider = self.id().display_name();
        if self.api_key.is_empty() {
            return Err(SearchError::MissingApiKey { provider });
        }

        let url = format!("{}/search/photos", self.api_base);
        let per_page = RESULTS_PER_SEARCH.to_string();

        tracing::debug!(query = %query, "performing unsplash search");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.api_key))
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %error_text, "unsplash api error");
            return Err(SearchError::RequestFailed { provider, status });
        }

        let body = response.text().await?;
        let payload: SearchResponse = serde_json::from_str(&body)
            .map_err(|source| SearchError::MalformedResponse { provider, source })?;

        let records = normalize(payload, query);
        tracing::debug!(query = %query, result_count = records.len(), "unsplash search completed");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    alt_description: Option<String>,
    user: User,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct User {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: String,
}

fn normalize(payload: SearchResponse, query: &str) -> Vec<ImageRecord> {
    payload
        .results
        .into_iter()
        .map(|photo| ImageRecord {
            id: photo.id,
            url: photo.urls.regular,
            alt_text: photo
                .alt_description
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| query.to_string()),
            attribution: photo.user.name,
            original_url: photo.links.html,
            source_name: ProviderId::Unsplash.display_name().to_string(),
        })
        .collect()
}
