//! Trailing-slash removal.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind};
use crate::services::HostServices;

/// Redirects paths carrying trailing slashes to their slashless form.
///
/// `/about/` and `/about` would otherwise both serve the same content. The
/// slashless path is resolved to its system path so the terminal step can
/// regenerate the canonical URL. Once a path has no trailing slash the rule
/// never fires again.
pub struct Deslash;

#[async_trait]
impl RedirectRule for Deslash {
    fn kind(&self) -> RuleKind {
        RuleKind::Deslash
    }

    fn priority(&self) -> i32 {
        80
    }

    fn enabled(&self, settings: &RedirectSettings) -> bool {
        settings.deslash
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        host: &HostServices,
    ) -> Result<Option<RedirectTarget>> {
        // The root has no slashes to strip.
        if ctx.path == "/" || !ctx.path.ends_with('/') {
            return Ok(None);
        }

        let trimmed = ctx.path.trim_matches('/');
        let system = host.aliases().system_path(trimmed, &ctx.language).await?;
        Ok(Some(RedirectTarget::Routed(system)))
    }
}
