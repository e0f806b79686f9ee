//! JSON body parsing with a size cap

use crate::error::AppError;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use std::error::Error as StdError;

/// Parsed JSON request body, available to handlers as an extension.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub serde_json::Value);

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json"
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

fn is_length_limit(err: &axum::Error) -> bool {
    std::iter::successors(Some(err as &(dyn StdError + 'static)), |&e| e.source())
        .any(|e| e.downcast_ref::<LengthLimitError>().is_some())
}

/// Buffers bodies declared as JSON, up to `limit` bytes, and parses them.
/// Oversized or malformed bodies short-circuit into the catch-all error response.
pub async fn parse_json_body(
    State(limit): State<usize>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !is_json(request.headers()) {
        return Ok(next.run(request).await);
    }

    let (mut parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
        if is_length_limit(&err) {
            AppError::PayloadTooLarge { limit }
        } else {
            AppError::BodyRead(err.to_string())
        }
    })?;

    if !bytes.is_empty() {
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        parts.extensions.insert(JsonBody(value));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(&headers_with("application/json")));
        assert!(is_json(&headers_with("application/json; charset=utf-8")));
        assert!(is_json(&headers_with("application/merge-patch+json")));
        assert!(!is_json(&headers_with("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn test_is_length_limit() {
        let err = axum::body::to_bytes(Body::from(vec![b'x'; 16]), 4)
            .await
            .unwrap_err();
        assert!(is_length_limit(&err));

        let err = axum::Error::new(std::io::Error::other("connection reset"));
        assert!(!is_length_limit(&err));
    }
}
