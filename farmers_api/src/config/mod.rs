//! Service configuration

pub mod settings;

pub use settings::{
    parse_origins, ApiConfig, LogFormat, DEFAULT_CORS_ORIGIN, DEFAULT_JSON_BODY_LIMIT_BYTES,
};
