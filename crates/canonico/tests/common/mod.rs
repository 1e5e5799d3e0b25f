#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Builds a real axum router with the canonicalization middleware mounted
//! and drives it through `tower::ServiceExt::oneshot`, no socket involved.
//! Every inner route answers 200 "ok" so pass-throughs are distinguishable
//! from redirects.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use canonico::{ExceptionStatus, NegotiatedLanguage, RedirectDecider, canonicalize_request};

/// Test application wrapper.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Mount the middleware for a decider on a catch-all router.
    pub fn new(decider: RedirectDecider) -> Self {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .fallback(|| async { "ok" })
            .layer(axum::middleware::from_fn_with_state(
                decider,
                canonicalize_request,
            ))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Issue a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Issue a GET request with a negotiated language, simulating the host's
    /// language middleware having run first.
    pub async fn get_in_language(&self, uri: &str, language: &str) -> Response {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(NegotiatedLanguage(language.to_string()));
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Issue a GET request flagged as an exception subrequest.
    pub async fn get_exception(&self, uri: &str, status: u16) -> Response {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request.extensions_mut().insert(ExceptionStatus(status));
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Location header value, if any.
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Assert a 301 redirect to `expected`.
pub fn assert_moved_permanently(response: &Response, expected: &str) {
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(response).as_deref(), Some(expected));
}

/// Assert the request was passed through to the inner handler.
pub async fn assert_passed_through(response: Response) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

/// Read the full response body as a string.
pub async fn body_string(response: Response) -> String {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
