pub mod providers;
pub mod registry;
pub mod session;

pub use registry::ProviderRegistry;
pub use session::{SearchSession, SearchTicket};

/// Page size shared by all four provider integrations.
pub const RESULTS_PER_SEARCH: usize = 12;

/// Image search provider abstraction - one implementation per backing API
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    /// Which provider this is
    fn id(&self) -> ProviderId;

    /// Run one search and return normalized records in provider order
    async fn search(&self, query: &str) -> Result<Vec<ImageRecord>, SearchError>;
}

impl std::fmt::Debug for dyn ImageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImageProvider({})", self.id().as_str())
    }
}

/// The fixed set of supported image sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Unsplash,
    Pixabay,
    Pexels,
    Freepik,
}

impl ProviderId {
    /// All providers, in the order they appear in the UI selector
    pub const ALL: [ProviderId; 4] = [
        ProviderId::Unsplash,
        ProviderId::Pixabay,
        ProviderId::Pexels,
        ProviderId::Freepik,
    ];

    /// Stable identifier used in config and dispatch
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Unsplash => "unsplash",
            ProviderId::Pixabay => "pixabay",
            ProviderId::Pexels => "pexels",
            ProviderId::Freepik => "freepik",
        }
    }

    /// Human-readable name, also stamped into `ImageRecord::source_name`
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Unsplash => "Unsplash",
            ProviderId::Pixabay => "Pixabay",
            ProviderId::Pexels => "Pexels",
            ProviderId::Freepik => "Freepik",
        }
    }

    /// Environment variable that overrides the configured API key
    pub fn key_env_var(&self) -> &'static str {
        match self {
            ProviderId::Unsplash => "UNSPLASH_API_KEY",
            ProviderId::Pixabay => "PIXABAY_API_KEY",
            ProviderId::Pexels => "PEXELS_API_KEY",
            ProviderId::Freepik => "FREEPIK_API_KEY",
        }
    }

    /// The provider after this one in the selector, wrapping around
    pub fn next(&self) -> ProviderId {
        match self {
            ProviderId::Unsplash => ProviderId::Pixabay,
            ProviderId::Pixabay => ProviderId::Pexels,
            ProviderId::Pexels => ProviderId::Freepik,
            ProviderId::Freepik => ProviderId::Unsplash,
        }
    }

    /// The provider before this one in the selector, wrapping around
    pub fn prev(&self) -> ProviderId {
        match self {
            ProviderId::Unsplash => ProviderId::Freepik,
            ProviderId::Pixabay => ProviderId::Unsplash,
            ProviderId::Pexels => ProviderId::Pixabay,
            ProviderId::Freepik => ProviderId::Pexels,
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsplash" => Ok(ProviderId::Unsplash),
            "pixabay" => Ok(ProviderId::Pixabay),
            "pexels" => Ok(ProviderId::Pexels),
            "freepik" => Ok(ProviderId::Freepik),
            other => Err(SearchError::UnknownProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One image hit, mapped from a provider-specific payload into the common shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Provider-native id; unique within a single result batch only
    pub id: String,
    /// Display-resolution image URL
    pub url: String,
    /// Provider-supplied description, falling back to the query text
    pub alt_text: String,
    /// Photographer/author name (raw username for Pixabay)
    pub attribution: String,
    /// Link to the image's page on the provider's site
    pub original_url: String,
    /// Display name of the provider that returned the record
    pub source_name: String,
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("unknown image provider: {0:?}")]
    UnknownProvider(String),

    #[error("{provider} API key is not configured")]
    MissingApiKey { provider: &'static str },

    #[error("{provider} request failed with status {status}")]
    RequestFailed {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{provider} returned a malformed response: {source}")]
    MalformedResponse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_round_trip() {
        for id in ProviderId::ALL {
            let parsed: ProviderId = id.as_str().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_unknown_provider_id() {
        let err = "imgur".parse::<ProviderId>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownProvider(ref s) if s == "imgur"));
    }

    #[test]
    fn test_provider_cycle_covers_all() {
        let mut seen = vec![ProviderId::Unsplash];
        let mut current = ProviderId::Unsplash;
        for _ in 0..3 {
            current = current.next();
            seen.push(current);
        }
        assert_eq!(seen, ProviderId::ALL.to_vec());
        assert_eq!(current.next(), ProviderId::Unsplash);
        assert_eq!(ProviderId::Unsplash.prev(), ProviderId::Freepik);
    }
}
