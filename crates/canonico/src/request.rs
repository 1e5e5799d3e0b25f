//! Request snapshot and request/response extension markers.

use axum::body::Body;
use axum::http::Request;

/// The negotiated language for the current request.
///
/// Inserted into request extensions by the host's language negotiation,
/// which runs before the canonicalization middleware and strips any URL
/// language prefix from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedLanguage(pub String);

/// Marker the host sets while rendering an exception (error) response.
///
/// Canonicalization must leave exception subrequests alone so error pages
/// render at the URL that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptionStatus(pub u16);

/// Response extension marking the response as ineligible for page caching.
///
/// Attached to routed canonicalization redirects; the host's page-cache
/// layer is expected to honor it.
#[derive(Debug, Clone, Copy)]
pub struct SkipPageCache;

/// Read-only snapshot of the request fields the redirect rules inspect.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The URI as received, including any query string.
    pub uri: String,
    /// URL path, language prefix already stripped by the host.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Negotiated language id for this request.
    pub language: String,
    /// Whether the host is rendering an exception response.
    pub is_exception: bool,
    /// Whether the request addresses the configured front page.
    ///
    /// Filled in by the decider before rules run; callers building a
    /// context never set it themselves.
    pub is_front_page: bool,
}

impl RequestContext {
    /// Snapshot an HTTP request with its negotiated language.
    pub fn from_request(request: &Request<Body>, language: impl Into<String>) -> Self {
        let uri = request.uri();
        Self {
            uri: uri.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            language: language.into(),
            is_exception: request.extensions().get::<ExceptionStatus>().is_some(),
            is_front_page: false,
        }
    }

    /// Whether the query string carries the given parameter name.
    pub fn query_has(&self, name: &str) -> bool {
        let Some(query) = &self.query else {
            return false;
        };
        query.split('&').any(|pair| {
            pair == name
                || pair
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('='))
        })
    }
}
