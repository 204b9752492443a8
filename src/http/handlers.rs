//! Route handlers.
//!
//! # Responsibilities
//! - Answer CORS preflight on any path
//! - Validate DoH requests (method, `dns` parameter, body size) before the core runs
//! - Buffer the POST body once and hand the request to the pool's executor
//!
//! # Design Decisions
//! - The body limit comes from the router's `DefaultBodyLimit` layer
//! - Only an exceeded limit answers 413; any other read failure is the client's 400

use axum::body::{Body, Bytes};
use axum::extract::rejection::{BytesRejection, FailedToBufferBody};
use axum::extract::{FromRequest, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::landing;
use crate::http::server::{AppState, DohExecutor};
use crate::relay::RelayRequest;

/// `/`: landing page, or preflight for OPTIONS.
pub async fn root(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight();
    }
    landing::render(request.headers(), request.uri(), state.public_scheme).into_response()
}

/// `/dns-query`: general pool.
pub async fn general_query(State(state): State<AppState>, request: Request<Body>) -> Response {
    dns_query(&state.general, request).await
}

/// `/family/dns-query`: family-safe pool.
pub async fn family_query(State(state): State<AppState>, request: Request<Body>) -> Response {
    dns_query(&state.family, request).await
}

/// Everything else.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// CORS preflight answer.
pub fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Accept"),
    );
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    response
}

async fn dns_query(executor: &DohExecutor, request: Request<Body>) -> Response {
    let method = request.method().clone();

    match method {
        Method::OPTIONS => return preflight(),
        Method::GET => {
            if !has_dns_param(request.uri().query()) {
                return (StatusCode::BAD_REQUEST, "Missing dns param").into_response();
            }
        }
        Method::POST => {}
        _ => return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response(),
    }

    let query = request.uri().query().map(str::to_owned);
    let headers = request.headers().clone();
    let body = if method == Method::POST {
        match Bytes::from_request(request, &()).await {
            Ok(bytes) => Some(bytes),
            Err(rejection) => return body_rejected(rejection),
        }
    } else {
        None
    };

    let relay_request = RelayRequest::new(method, query, headers, body);

    executor.handle(&relay_request).await.into_response()
}

fn body_rejected(rejection: BytesRejection) -> Response {
    tracing::debug!(error = %rejection, "Rejecting DoH body");
    match rejection {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
            (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large").into_response()
        }
        _ => (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
    }
}

fn has_dns_param(query: Option<&str>) -> bool {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).any(|(key, _)| key == "dns"))
        .unwrap_or(false)
}
