use crate::config::Config;
use crate::search::providers::{FreepikProvider, PexelsProvider, PixabayProvider, UnsplashProvider};
use crate::search::{ImageProvider, ProviderId, SearchError};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Bounded request timeout applied to every provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The fixed set of provider instances, one per [`ProviderId`]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    /// Build the four production providers, sharing one HTTP client
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        let key = |id: ProviderId| {
            config.api_key(id).unwrap_or_else(|| {
                tracing::warn!(provider = id.as_str(), "API key not set, searches will fail");
                String::new()
            })
        };

        let providers: Vec<Arc<dyn ImageProvider>> = vec![
            Arc::new(UnsplashProvider::new(
                client.clone(),
                key(ProviderId::Unsplash),
            )),
            Arc::new(PixabayProvider::new(
                client.clone(),
                key(ProviderId::Pixabay),
            )),
            Arc::new(PexelsProvider::new(client.clone(), key(ProviderId::Pexels))),
            Arc::new(FreepikProvider::new(client, key(ProviderId::Freepik))),
        ];

        Ok(Self { providers })
    }

    /// Build a registry from explicit providers (fakes, test endpoints)
    pub fn with_providers(providers: Vec<Arc<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    /// Look up a provider by typed id
    pub fn get(&self, id: ProviderId) -> Result<Arc<dyn ImageProvider>, SearchError> {
        self.providers
            .iter()
            .find(|provider| provider.id() == id)
            .cloned()
            .ok_or_else(|| SearchError::UnknownProvider(id.as_str().to_string()))
    }

    /// Look up a provider by raw string id, e.g. from config.
    ///
    /// Never touches the network: an unrecognized id fails here.
    pub fn resolve(&self, raw: &str) -> Result<Arc<dyn ImageProvider>, SearchError> {
        let id: ProviderId = raw.parse()?;
        self.get(id)
    }
}
