//! Client configuration

use config::{Config, ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `API_URL` from the process environment over the compiled default.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    pub fn load_from(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Config::try_from(&ClientConfig::default())?)
            .add_source(Environment::default().separator("__").source(env))
            .build()?;

        let mut client_config: ClientConfig = config.try_deserialize()?;
        if client_config.api_url.trim().is_empty() {
            client_config.api_url = DEFAULT_API_URL.to_string();
        }

        Ok(client_config)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// The API base URL with a single trailing slash removed.
    pub fn api_base(&self) -> String {
        self.api_url
            .strip_suffix('/')
            .unwrap_or(&self.api_url)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        let config = ClientConfig::load_from(Some(Map::new())).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.api_base(), "http://localhost:3000");
    }

    #[test]
    fn test_api_url_from_environment() {
        let env: Map<String, String> =
            [("API_URL".to_string(), "https://api.farmers.example/".to_string())]
                .into_iter()
                .collect();

        let config = ClientConfig::load_from(Some(env)).unwrap();
        assert_eq!(config.api_base(), "https://api.farmers.example");
    }

    #[test]
    fn test_only_one_trailing_slash_is_stripped() {
        assert_eq!(
            ClientConfig::with_api_url("http://host/v1//").api_base(),
            "http://host/v1/"
        );
        assert_eq!(ClientConfig::with_api_url("http://host").api_base(), "http://host");
    }

    #[test]
    fn test_blank_api_url_falls_back_to_default() {
        let env: Map<String, String> = [("API_URL".to_string(), String::new())]
            .into_iter()
            .collect();

        let config = ClientConfig::load_from(Some(env)).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
