//! Middleware components for the HTTP server

pub mod cors;
pub mod json_body;
pub mod logging;
pub mod security;
