use crate::apikey::ApiKey;
use crate::error::{RestError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// Create the default HTTP client for entity requests
/// with settings for connection pooling and timeouts
pub fn create_rest_client(config: &Config) -> Result<Client> {
    builder(config)
        .timeout(config.timeout)
        .build()
        .map_err(|e| RestError::RequestBuild(format!("failed to create HTTP client: {}", e)))
}

/// Create the HTTP client for export/import requests with a longer timeout
pub fn create_transfer_client(config: &Config) -> Result<Client> {
    builder(config)
        .timeout(config.transfer_timeout)
        .build()
        .map_err(|e| RestError::RequestBuild(format!("failed to create transfer client: {}", e)))
}

fn builder(config: &Config) -> ClientBuilder {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
}

/// Configuration for an entity REST client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the product API, e.g. `http://localhost:12010/v2`
    pub base_url: String,
    /// API key sent as `X-API-Key`; empty means no header
    pub api_key: ApiKey,
    /// Timeout for regular entity requests
    pub timeout: Option<Duration>,
    /// Timeout for establishing a connection
    pub connect_timeout: Duration,
    /// Timeout for export/import round trips
    pub transfer_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://localhost:8080".to_string(),
            api_key: ApiKey::default(),
            timeout: Some(Duration::from_secs(300)), // 5 minutes
            connect_timeout: Duration::from_secs(10),
            transfer_timeout: Some(Duration::from_secs(3600)), // 1 hour
            user_agent: format!("entity-rest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            ..Config::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the request timeout; `None` disables it
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the export/import timeout; `None` disables it
    pub fn with_transfer_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.transfer_timeout = timeout;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("http://localhost:12010/v2");
        assert_eq!(config.base_url, "http://localhost:12010/v2");
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout, Some(Duration::from_secs(300)));
        assert_eq!(config.transfer_timeout, Some(Duration::from_secs(3600)));
        assert!(config.user_agent.starts_with("entity-rest/"));
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new("http://localhost")
            .with_api_key("secret")
            .with_timeout(None)
            .with_user_agent("cli/1.0");
        assert_eq!(config.api_key.as_str(), "secret");
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent, "cli/1.0");
    }

    #[test]
    fn test_create_clients() {
        let config = Config::default();
        assert!(create_rest_client(&config).is_ok());
        assert!(create_transfer_client(&config).is_ok());
    }
}
