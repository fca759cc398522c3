use crate::search::ProviderId;
use serde::{Deserialize, Serialize};

/// Value written into freshly created config files; treated as unset.
const KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider selected at startup
    #[serde(default = "default_provider_id")]
    pub default_provider: String,

    /// Write debug logs to a file under the config directory
    #[serde(default)]
    pub debug: bool,

    /// Override for the debug log file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    /// Per-provider API keys
    #[serde(default)]
    pub keys: ApiKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: ProviderId::Unsplash.as_str().to_string(),
            debug: false,
            debug_log_path: None,
            keys: ApiKeys::default(),
        }
    }
}

/// One API key per provider. Keys can also be supplied through the
/// environment (`UNSPLASH_API_KEY` and friends), which takes precedence
/// over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub unsplash: String,
    #[serde(default)]
    pub pixabay: String,
    #[serde(default)]
    pub pexels: String,
    #[serde(default)]
    pub freepik: String,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            unsplash: KEY_PLACEHOLDER.to_string(),
            pixabay: KEY_PLACEHOLDER.to_string(),
            pexels: KEY_PLACEHOLDER.to_string(),
            freepik: KEY_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Resolve the API key for a provider, if one is actually configured.
    ///
    /// Environment variables win over the config file; empty values and the
    /// generated placeholder count as unset.
    pub fn api_key(&self, id: ProviderId) -> Option<String> {
        let raw = std::env::var(id.key_env_var()).unwrap_or_else(|_| {
            match id {
                ProviderId::Unsplash => &self.keys.unsplash,
                ProviderId::Pixabay => &self.keys.pixabay,
                ProviderId::Pexels => &self.keys.pexels,
                ProviderId::Freepik => &self.keys.freepik,
            }
            .clone()
        });

        let key = raw.trim();
        if key.is_empty() || key == KEY_PLACEHOLDER {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Parse `default_provider`, falling back to Unsplash on bad input
    pub fn startup_provider(&self) -> ProviderId {
        self.default_provider.parse().unwrap_or_else(|_| {
            tracing::warn!(
                default_provider = %self.default_provider,
                "unknown default_provider in config, falling back to unsplash"
            );
            ProviderId::Unsplash
        })
    }
}

fn default_provider_id() -> String {
    ProviderId::Unsplash.as_str().to_string()
}
