//! Alias normalization.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind};
use crate::services::HostServices;

/// Query parameter the host sets while rendering error pages; such requests
/// must not be rewritten.
const EXCEPTION_STATUS_PARAM: &str = "_exception_statuscode";

/// Redirects requests onto the canonical alias of the content they address.
///
/// Content stays reachable through its system path and any number of stale
/// aliases; only the current alias, with the language prefix applied, is
/// canonical. Everything else redirects there.
pub struct NormalizeAlias;

#[async_trait]
impl RedirectRule for NormalizeAlias {
    fn kind(&self) -> RuleKind {
        RuleKind::NormalizeAlias
    }

    fn priority(&self) -> i32 {
        40
    }

    fn enabled(&self, settings: &RedirectSettings) -> bool {
        settings.normalize_aliases
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        host: &HostServices,
    ) -> Result<Option<RedirectTarget>> {
        // The front page has its own rule; exception rendering is off limits.
        if ctx.is_front_page || ctx.is_exception || ctx.query_has(EXCEPTION_STATUS_PARAM) {
            return Ok(None);
        }

        let current = ctx.path.trim_matches('/');
        let system = host.aliases().system_path(current, &ctx.language).await?;
        let alias = host.aliases().alias_for(&system, &ctx.language).await?;

        let canonical = host
            .languages()
            .prefixed_path(&format!("/{alias}"), &ctx.language);
        let requested = host.languages().prefixed_path(&ctx.path, &ctx.language);
        if canonical == requested {
            return Ok(None);
        }

        // Submit the unprefixed system path; URL assembly re-applies the
        // alias and the language prefix.
        Ok(Some(RedirectTarget::Routed(system)))
    }
}
