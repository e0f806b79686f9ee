use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {0}")]
    Status(u16),

    #[error("Invalid health payload: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Health payload was null")]
    EmptyPayload,
}
