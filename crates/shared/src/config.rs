//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Reference-data cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cache configuration for account-scoped classification lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of accounts whose classifications are kept.
    #[serde(default = "default_classification_capacity")]
    pub classification_capacity: u64,
    /// Time-to-live for a cached classification list.
    #[serde(default = "default_classification_ttl")]
    pub classification_ttl_secs: u64,
}

fn default_classification_capacity() -> u64 {
    256
}

fn default_classification_ttl() -> u64 {
    600 // 10 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            classification_capacity: default_classification_capacity(),
            classification_ttl_secs: default_classification_ttl(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `TALLY__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
