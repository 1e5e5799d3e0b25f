//! Request canonicalization middleware.
//!
//! Mounts in front of the host router, after language negotiation. Evaluates
//! the redirect rule chain and either issues a single 301 or passes the
//! request through untouched.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::decider::{RedirectDecider, RedirectDecision};
use crate::error::RedirectError;
use crate::request::{NegotiatedLanguage, RequestContext, SkipPageCache};

/// `Cache-Control` value attached to routed canonicalization redirects so
/// clients and proxies revalidate them instead of pinning a stale target.
pub const REVALIDATE_CACHE_CONTROL: &str = "no-cache, must-revalidate, post-check=0, pre-check=0";

/// Middleware evaluating the canonicalization rule chain.
///
/// The negotiated language comes from request extensions when the host's
/// language layer provides it, falling back to the site default. Host
/// service failures surface as the host's 500 response; everything else is
/// either a 301 or an untouched pass-through.
pub async fn canonicalize_request(
    State(decider): State<RedirectDecider>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let language = request
        .extensions()
        .get::<NegotiatedLanguage>()
        .map(|l| l.0.clone())
        .unwrap_or_else(|| decider.host().languages().default_language().to_string());

    let ctx = RequestContext::from_request(&request, language);

    match decider.decide(ctx).await {
        Ok(Some(decision)) => redirect_response(&decision),
        Ok(None) => next.run(request).await,
        Err(e) => RedirectError::Host(e).into_response(),
    }
}

/// Build the 301 response for a decision.
///
/// Routed targets carry the revalidation `Cache-Control` header and the
/// [`SkipPageCache`] extension; immediate targets are served bare.
fn redirect_response(decision: &RedirectDecision) -> Response {
    // Sanitize the target to prevent CRLF injection into the Location header.
    let location: String = decision
        .target_uri()
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    tracing::debug!(
        rule = %decision.rule,
        location = %location,
        "issuing canonicalization redirect"
    );

    let mut response =
        (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();

    if decision.route.is_some() {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(REVALIDATE_CACHE_CONTROL),
        );
        response.extensions_mut().insert(SkipPageCache);
    }

    response
}
