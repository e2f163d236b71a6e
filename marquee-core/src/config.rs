//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase. The configuration is
//! built once at startup and handed to services as an immutable value.

use std::time::Duration;

use crate::MarqueeError;

/// Quiescence window before a typed search term is considered settled.
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

/// Number of trending searches shown on the home page.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// Metadata API (TMDB) configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the metadata API, without the version segment
    pub base_url: String,
    /// Bearer token sent with every request
    pub access_token: Option<String>,
    /// Base URL for poster thumbnails
    pub poster_base_url: String,
    /// Base URL for full size backdrops and logos
    pub backdrop_base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org".to_string(),
            access_token: None,
            poster_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            backdrop_base_url: "https://image.tmdb.org/t/p/original".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Search flow tuning.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Inactivity window before the search term settles
    pub debounce_interval: Duration,
    /// Maximum trending searches to display
    pub trending_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

/// Remote document store holding the search counters.
///
/// The store speaks the Appwrite REST dialect. When no project is configured
/// production mode falls back to in-memory counters.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub api_key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: None,
            database_id: None,
            collection_id: None,
            api_key: None,
        }
    }
}

impl StoreConfig {
    /// Returns true when every identifier needed to reach the store is set.
    pub fn is_configured(&self) -> bool {
        self.project_id.is_some() && self.database_id.is_some() && self.collection_id.is_some()
    }
}

/// Web server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Metadata API overrides
        if let Some(token) = lookup("MARQUEE_TMDB_API_TOKEN").filter(|t| !t.is_empty()) {
            config.api.access_token = Some(token);
        }

        if let Some(base_url) = lookup("MARQUEE_TMDB_BASE_URL") {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(timeout) = lookup("MARQUEE_REQUEST_TIMEOUT_SECS")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.api.request_timeout = Duration::from_secs(seconds);
        }

        // Search tuning overrides
        if let Some(debounce) = lookup("MARQUEE_DEBOUNCE_MS")
            && let Ok(millis) = debounce.parse::<u64>()
        {
            config.search.debounce_interval = Duration::from_millis(millis);
        }

        if let Some(limit) = lookup("MARQUEE_TRENDING_LIMIT")
            && let Ok(count) = limit.parse::<usize>()
        {
            config.search.trending_limit = count;
        }

        // Document store overrides
        if let Some(endpoint) = lookup("MARQUEE_APPWRITE_ENDPOINT") {
            config.store.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        config.store.project_id = lookup("MARQUEE_APPWRITE_PROJECT_ID").or(config.store.project_id);
        config.store.database_id =
            lookup("MARQUEE_APPWRITE_DATABASE_ID").or(config.store.database_id);
        config.store.collection_id =
            lookup("MARQUEE_APPWRITE_COLLECTION_ID").or(config.store.collection_id);
        config.store.api_key = lookup("MARQUEE_APPWRITE_API_KEY").or(config.store.api_key);

        // Server overrides
        if let Some(host) = lookup("MARQUEE_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("MARQUEE_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            config.server.port = port;
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Points the API at an unroutable local address so nothing leaves the
    /// machine by accident.
    pub fn for_testing() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                access_token: Some("test-token".to_string()),
                request_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Checks the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// - `MarqueeError::Configuration` - Zero debounce window, zero trending
    ///   limit, or a production setup without an API token
    pub fn validate(&self, require_credentials: bool) -> Result<(), MarqueeError> {
        if self.search.debounce_interval.is_zero() {
            return Err(MarqueeError::Configuration {
                reason: "debounce interval must be greater than zero".to_string(),
            });
        }

        if self.search.trending_limit == 0 {
            return Err(MarqueeError::Configuration {
                reason: "trending limit must be greater than zero".to_string(),
            });
        }

        if require_credentials && self.api.access_token.is_none() {
            return Err(MarqueeError::Configuration {
                reason: "MARQUEE_TMDB_API_TOKEN is not set".to_string(),
            });
        }

        Ok(())
    }

    /// Socket address string for the web server.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = MarqueeConfig::default();

        assert_eq!(config.api.base_url, "https://api.themoviedb.org");
        assert!(config.api.access_token.is_none());
        assert_eq!(config.search.debounce_interval, Duration::from_millis(500));
        assert_eq!(config.search.trending_limit, 5);
        assert_eq!(config.server.port, 3000);
        assert!(!config.store.is_configured());
    }

    #[test]
    fn test_env_override() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("MARQUEE_TMDB_API_TOKEN", "secret"),
            ("MARQUEE_TMDB_BASE_URL", "http://localhost:8080/"),
            ("MARQUEE_DEBOUNCE_MS", "250"),
            ("MARQUEE_TRENDING_LIMIT", "10"),
            ("MARQUEE_APPWRITE_PROJECT_ID", "proj"),
            ("MARQUEE_APPWRITE_DATABASE_ID", "db"),
            ("MARQUEE_APPWRITE_COLLECTION_ID", "metrics"),
            ("MARQUEE_PORT", "8081"),
        ]));

        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.search.debounce_interval, Duration::from_millis(250));
        assert_eq!(config.search.trending_limit, 10);
        assert!(config.store.is_configured());
        assert_eq!(config.bind_address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("MARQUEE_DEBOUNCE_MS", "soon"),
            ("MARQUEE_PORT", "99999"),
            ("MARQUEE_TMDB_API_TOKEN", ""),
        ]));

        assert_eq!(config.search.debounce_interval, DEFAULT_DEBOUNCE_INTERVAL);
        assert_eq!(config.server.port, 3000);
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_validate() {
        let mut config = MarqueeConfig::for_testing();
        assert!(config.validate(true).is_ok());

        config.search.trending_limit = 0;
        assert!(config.validate(false).is_err());

        let config = MarqueeConfig::default();
        assert!(config.validate(false).is_ok());
        assert!(matches!(
            config.validate(true),
            Err(MarqueeError::Configuration { .. })
        ));
    }
}
