//! Routing and validation tests driven in-process through the router.

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use doh_relay::HttpServer;

mod common;

/// Router whose providers are never reached by these tests.
async fn router() -> axum::Router {
    let dead = common::dead_provider_url().await;
    let config = common::relay_config(
        vec![common::provider("Dead", &dead, 1)],
        vec![common::provider("Dead", &dead, 1)],
    );
    HttpServer::new(config).unwrap().router()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "relay.test")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_options_preflight_on_dns_query() {
    let response = router().await.oneshot(request(Method::OPTIONS, "/dns-query")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Accept");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_options_preflight_on_any_path() {
    for path in ["/", "/family/dns-query", "/some/other/path"] {
        let response = router().await.oneshot(request(Method::OPTIONS, path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "path {}", path);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}

#[tokio::test]
async fn test_get_without_dns_param_is_rejected() {
    for uri in ["/dns-query", "/dns-query?name=example.com", "/family/dns-query"] {
        let response = router().await.oneshot(request(Method::GET, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(body, "Missing dns param");
    }
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
        let response = router().await.oneshot(request(method.clone(), "/dns-query?dns=AAAB")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "method {}", method);
    }
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = router().await.oneshot(request(Method::GET, "/resolve?name=example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(body, "Not Found");
}

#[tokio::test]
async fn test_landing_page_lists_endpoints() {
    let response = router().await.oneshot(request(Method::GET, "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));

    let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let page = String::from_utf8(body.to_vec()).unwrap();
    assert!(page.contains("http://relay.test/dns-query"));
    assert!(page.contains("http://relay.test/family/dns-query"));
}

#[tokio::test]
async fn test_oversized_post_is_rejected() {
    let dead = common::dead_provider_url().await;
    let mut config = common::relay_config(
        vec![common::provider("Dead", &dead, 1)],
        vec![common::provider("Dead", &dead, 1)],
    );
    config.limits.max_body_bytes = 16;
    let router = HttpServer::new(config).unwrap().router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/dns-query")
        .header(header::CONTENT_TYPE, "application/dns-message")
        .body(Body::from(vec![0u8; 64]))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(body, "Payload Too Large");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let response = router().await.oneshot(request(Method::GET, "/")).await.unwrap();
    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_broken_post_body_is_bad_request() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"\xab\xcd")),
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "client went away")),
    ];
    let request = Request::builder()
        .method(Method::POST)
        .uri("/dns-query")
        .header(header::CONTENT_TYPE, "application/dns-message")
        .body(Body::from_stream(futures_util::stream::iter(chunks)))
        .unwrap();

    let response = router().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(body, "Bad Request");
}
