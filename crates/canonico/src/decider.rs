//! Redirect decision engine.
//!
//! Runs the rule chain in priority order against a request snapshot and
//! produces at most one redirect decision per request. Routed targets pass
//! through a shared terminal step: route assembly, query re-attachment, and
//! the policy gate.

use std::sync::Arc;

use anyhow::Result;

use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind, default_rules};
use crate::services::HostServices;

/// Outcome of a canonicalization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    /// Outbound location, without the query string.
    pub location: String,
    /// Query string to re-attach, when the original request carried one.
    pub query: Option<String>,
    /// Matched route name for routed targets; `None` for immediate targets.
    pub route: Option<String>,
    /// The rule that produced the decision.
    pub rule: RuleKind,
}

impl RedirectDecision {
    /// Full redirect URI: location plus any re-attached query string.
    pub fn target_uri(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.location),
            _ => self.location.clone(),
        }
    }
}

/// The decision engine: an ordered rule chain over a host service bundle.
///
/// Cheap to clone; used directly as axum middleware state.
#[derive(Clone)]
pub struct RedirectDecider {
    inner: Arc<DeciderInner>,
}

struct DeciderInner {
    host: HostServices,
    rules: Vec<Arc<dyn RedirectRule>>,
}

impl RedirectDecider {
    /// Decider with the standard rule chain.
    pub fn new(host: HostServices) -> Self {
        Self::with_rules(host, default_rules())
    }

    /// Decider with a custom rule chain, sorted by descending priority.
    pub fn with_rules(host: HostServices, mut rules: Vec<Arc<dyn RedirectRule>>) -> Self {
        rules.sort_by_key(|rule| std::cmp::Reverse(rule.priority()));
        Self {
            inner: Arc::new(DeciderInner { host, rules }),
        }
    }

    pub fn host(&self) -> &HostServices {
        &self.inner.host
    }

    /// Evaluate the rule chain for one request.
    ///
    /// Settings are loaded fresh per call, and the front-page flag is
    /// computed here, so callers never populate it themselves. Returns the
    /// first decision that survives route assembly and the policy gate; a
    /// rule whose target fails either check declines and later rules still
    /// run.
    pub async fn decide(&self, mut ctx: RequestContext) -> Result<Option<RedirectDecision>> {
        let host = &self.inner.host;
        let settings = host.config().redirect_settings().await?;

        // Only computed when a rule that consults it is enabled.
        if settings.front_page || settings.normalize_aliases {
            ctx.is_front_page = matches_front_page(host, &ctx).await?;
        }

        for rule in &self.inner.rules {
            if !rule.enabled(&settings) {
                continue;
            }

            let Some(target) = rule.evaluate(&ctx, host).await? else {
                continue;
            };

            match target {
                RedirectTarget::Immediate(location) => {
                    return Ok(Some(RedirectDecision {
                        location,
                        query: None,
                        route: None,
                        rule: rule.kind(),
                    }));
                }
                RedirectTarget::Routed(path) => {
                    if let Some(decision) = self.resolve_target(rule.kind(), &path, &ctx).await? {
                        return Ok(Some(decision));
                    }
                    // Route miss or policy refusal: the rule declines and
                    // later rules get their turn.
                }
            }
        }

        Ok(None)
    }

    /// Terminal step for routed targets.
    async fn resolve_target(
        &self,
        rule: RuleKind,
        path: &str,
        ctx: &RequestContext,
    ) -> Result<Option<RedirectDecision>> {
        let host = &self.inner.host;

        let Some(assembled) = host.routes().assemble_url(path, &ctx.language).await? else {
            tracing::debug!(rule = %rule, path = %path, "no route for redirect target");
            return Ok(None);
        };

        if !host.policy().allows_redirect(&assembled.route, ctx).await? {
            tracing::debug!(rule = %rule, route = %assembled.route, "redirect refused by policy");
            return Ok(None);
        }

        Ok(Some(RedirectDecision {
            location: assembled.location,
            query: ctx.query.clone(),
            route: Some(assembled.route),
            rule,
        }))
    }
}

/// Whether the request addresses the configured front page.
///
/// The site root always does; any other path matches when its resolved
/// system path equals the configured front-page path.
async fn matches_front_page(host: &HostServices, ctx: &RequestContext) -> Result<bool> {
    if ctx.path == "/" {
        return Ok(true);
    }

    let Some(front) = host.config().front_page().await? else {
        return Ok(false);
    };

    let system = host
        .aliases()
        .system_path(ctx.path.trim_matches('/'), &ctx.language)
        .await?;
    Ok(system == front.trim_matches('/'))
}
