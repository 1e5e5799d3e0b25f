//! Redirect eligibility policy.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::request::RequestContext;

/// Gate deciding whether a canonicalization redirect may be served.
///
/// Consulted after route assembly, with the matched route name. Hosts plug
/// in their own policy to keep canonicalization away from anything that must
/// answer at the exact URL it was asked for.
#[async_trait]
pub trait RedirectPolicy: Send + Sync {
    /// Whether a redirect onto `route` is allowed for this request.
    async fn allows_redirect(&self, route: &str, ctx: &RequestContext) -> Result<bool>;
}

/// Default policy: refuse canonicalization under system path prefixes and
/// for explicitly denied route names.
pub struct PathPrefixPolicy {
    skip_prefixes: Vec<String>,
    denied_routes: HashSet<String>,
}

impl Default for PathPrefixPolicy {
    fn default() -> Self {
        Self::new(
            ["/admin", "/api", "/static", "/install", "/oauth", "/health"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        )
    }
}

impl PathPrefixPolicy {
    pub fn new(skip_prefixes: Vec<String>) -> Self {
        Self {
            skip_prefixes,
            denied_routes: HashSet::new(),
        }
    }

    /// Also deny redirects onto a specific route name.
    pub fn with_denied_route(mut self, route: &str) -> Self {
        self.denied_routes.insert(route.to_string());
        self
    }
}

#[async_trait]
impl RedirectPolicy for PathPrefixPolicy {
    async fn allows_redirect(&self, route: &str, ctx: &RequestContext) -> Result<bool> {
        if self.denied_routes.contains(route) {
            return Ok(false);
        }
        Ok(!self
            .skip_prefixes
            .iter()
            .any(|prefix| ctx.path.starts_with(prefix)))
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn ctx(uri: &str) -> RequestContext {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        RequestContext::from_request(&request, "en")
    }

    #[tokio::test]
    async fn content_paths_are_allowed() {
        let policy = PathPrefixPolicy::default();
        assert!(policy.allows_redirect("item.view", &ctx("/about/")).await.unwrap());
    }

    #[tokio::test]
    async fn system_prefixes_are_refused() {
        let policy = PathPrefixPolicy::default();
        assert!(
            !policy
                .allows_redirect("admin.settings", &ctx("/admin/config/"))
                .await
                .unwrap()
        );
        assert!(
            !policy
                .allows_redirect("api.items", &ctx("/api/items/"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn denied_routes_are_refused_anywhere() {
        let policy = PathPrefixPolicy::default().with_denied_route("checkout.pay");
        assert!(
            !policy
                .allows_redirect("checkout.pay", &ctx("/pay/"))
                .await
                .unwrap()
        );
        assert!(policy.allows_redirect("item.view", &ctx("/pay/")).await.unwrap());
    }
}
