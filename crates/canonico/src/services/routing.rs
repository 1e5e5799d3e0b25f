//! Route matching and outbound URL assembly.

use anyhow::Result;
use async_trait::async_trait;

/// Sentinel path addressing the configured front-page route.
pub const FRONT_PAGE: &str = "<front>";

/// A successfully assembled routed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledUrl {
    /// Name of the matched route.
    pub route: String,
    /// Outbound location: the canonical alias with the language prefix
    /// applied, rooted at `/`.
    pub location: String,
}

/// Route matching plus outbound URL generation in a single call.
#[async_trait]
pub trait RouteMatcher: Send + Sync {
    /// Match a system path to a route and build its outbound URL.
    ///
    /// Returns `None` when no route serves the path. Implementations must
    /// accept the [`FRONT_PAGE`] sentinel and map it to the front-page route
    /// with the (prefixed) site root as location.
    async fn assemble_url(&self, path: &str, language: &str) -> Result<Option<AssembledUrl>>;
}
