use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
};
use farmers_api::{create_app, ApiConfig};
use proptest::prelude::*;
use tower::ServiceExt;

async fn get_with_origin(config: &ApiConfig, origin: &str) -> HeaderMap {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();

    let response = create_app(config).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.headers().clone()
}

fn allowed_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_default_origin_is_allowed() {
    let headers = get_with_origin(&ApiConfig::default(), "http://localhost:5173").await;
    assert_eq!(allowed_origin(&headers).as_deref(), Some("http://localhost:5173"));
}

#[tokio::test]
async fn test_unlisted_origin_gets_no_allow_header() {
    let headers = get_with_origin(&ApiConfig::default(), "https://evil.example").await;
    assert_eq!(allowed_origin(&headers), None);
}

#[tokio::test]
async fn test_star_origin_matches_nothing() {
    let config = ApiConfig::default().with_origins(["*"]);
    assert!(config.validate().is_ok());

    let headers = get_with_origin(&config, "https://anywhere.example").await;
    assert_eq!(allowed_origin(&headers), None);
    assert_eq!(headers["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_star_next_to_listed_origin_keeps_the_listed_one() {
    let config = ApiConfig::default().with_origins(["*", "https://farmers.example"]);

    let headers = get_with_origin(&config, "https://farmers.example").await;
    assert_eq!(allowed_origin(&headers).as_deref(), Some("https://farmers.example"));

    let headers = get_with_origin(&config, "https://evil.example").await;
    assert_eq!(allowed_origin(&headers), None);
}

#[tokio::test]
async fn test_preflight_advertises_method_set() {
    let config = ApiConfig::default().with_origins(["https://farmers.example"]);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/health")
        .header(header::ORIGIN, "https://farmers.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
        .body(Body::empty())
        .unwrap();

    let response = create_app(&config).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        allowed_origin(headers).as_deref(),
        Some("https://farmers.example")
    );
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
    assert_eq!(headers["x-content-type-options"], "nosniff");
}

fn origin_strategy() -> impl Strategy<Value = String> {
    ("(http|https)", "[a-z]{1,8}", prop::option::of(1024u16..65535))
        .prop_map(|(scheme, host, port)| match port {
            Some(port) => format!("{scheme}://{host}.example:{port}"),
            None => format!("{scheme}://{host}.example"),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_cors_allows_exactly_configured_origins(
        configured in prop::collection::vec(origin_strategy(), 1..5),
        outsider in origin_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let config = ApiConfig::default().with_origins(configured.clone());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let member = pick.get(&configured).clone();
        let headers = runtime.block_on(get_with_origin(&config, &member));
        prop_assert_eq!(allowed_origin(&headers), Some(member));

        let headers = runtime.block_on(get_with_origin(&config, &outsider));
        if configured.contains(&outsider) {
            prop_assert_eq!(allowed_origin(&headers), Some(outsider));
        } else {
            prop_assert_eq!(allowed_origin(&headers), None);
        }
    }
}
