use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File, Map};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_JSON_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub json_body_limit_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            json_body_limit_bytes: DEFAULT_JSON_BODY_LIMIT_BYTES,
            log_format: LogFormat::Text,
        }
    }
}

impl ApiConfig {
    /// Loads defaults, then `config.toml` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`ApiConfig::load`] but reads variables from `env` instead of the
    /// process environment when given.
    pub fn load_from(env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&ApiConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::default()
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors_origins")
                .source(env),
        );

        let mut app_config: ApiConfig = builder.build()?.try_deserialize()?;
        app_config.cors_origins = normalize_origins(&app_config.cors_origins);
        if app_config.cors_origins.is_empty() {
            app_config.cors_origins = parse_origins(None);
        }

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn with_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let origins: Vec<String> = origins.into_iter().map(Into::into).collect();
        self.cors_origins = normalize_origins(&origins);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.json_body_limit_bytes == 0 {
            return Err(ConfigError::Message(
                "JSON body limit must be greater than 0".to_string(),
            ));
        }

        if self.cors_origins.is_empty() {
            return Err(ConfigError::Message(
                "At least one CORS origin must be configured".to_string(),
            ));
        }

        if let Some(bad) = self
            .cors_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            return Err(ConfigError::Message(format!(
                "Invalid CORS origin: {bad:?}"
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Splits a raw `CORS_ORIGINS` value. `None` yields the local development origin.
pub fn parse_origins(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![DEFAULT_CORS_ORIGIN.to_string()],
    }
}

fn normalize_origins(origins: &[String]) -> Vec<String> {
    origins
        .iter()
        .flat_map(|origin| parse_origins(Some(origin.as_str())))
        .collect()
}
