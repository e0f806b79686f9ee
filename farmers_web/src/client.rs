//! HTTP client for the API health endpoint

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
};
use serde_json::Value;
use tracing::debug;

/// What a successful health response says about the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Online,
    /// The API answered but did not report `"ok"`; holds the reported status, if any.
    Degraded(Option<String>),
}

impl Reachability {
    pub fn from_payload(payload: &Value) -> Result<Self> {
        if payload.is_null() {
            return Err(ClientError::EmptyPayload);
        }

        match payload.get("status") {
            Some(Value::String(status)) if status == "ok" => Ok(Reachability::Online),
            Some(Value::String(status)) => Ok(Reachability::Degraded(Some(status.clone()))),
            Some(other) => Ok(Reachability::Degraded(Some(other.to_string()))),
            None => Ok(Reachability::Degraded(None)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HealthClient {
    http: reqwest::Client,
    api_base: String,
    health_url: String,
}

impl HealthClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Setup)?;

        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &ClientConfig) -> Self {
        let api_base = config.api_base();
        let health_url = format!("{api_base}/health");

        Self {
            http,
            api_base,
            health_url,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// Issues `GET <api_base>/health`. Non-success statuses are failures.
    pub async fn fetch(&self) -> Result<Reachability> {
        debug!(url = %self.health_url, "Checking API health");

        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await.map_err(ClientError::Decode)?;
        Reachability::from_payload(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reachability_from_payload() {
        assert_eq!(
            Reachability::from_payload(&json!({ "status": "ok" })).unwrap(),
            Reachability::Online
        );
        assert_eq!(
            Reachability::from_payload(&json!({ "status": "degraded" })).unwrap(),
            Reachability::Degraded(Some("degraded".to_string()))
        );
        assert_eq!(
            Reachability::from_payload(&json!({ "uptime": 3 })).unwrap(),
            Reachability::Degraded(None)
        );
        assert_eq!(
            Reachability::from_payload(&json!({ "status": true })).unwrap(),
            Reachability::Degraded(Some("true".to_string()))
        );
        assert!(matches!(
            Reachability::from_payload(&Value::Null),
            Err(ClientError::EmptyPayload)
        ));
    }

    #[test]
    fn test_health_url_uses_stripped_base() {
        let config = ClientConfig::with_api_url("http://localhost:3000/");
        let client = HealthClient::new(&config).unwrap();
        assert_eq!(client.api_base(), "http://localhost:3000");
        assert_eq!(client.health_url(), "http://localhost:3000/health");
    }
}
