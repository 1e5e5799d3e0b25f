//! Front-page canonicalization.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind};
use crate::services::{FRONT_PAGE, HostServices};

/// Collapses requests for the configured front page onto the site root.
///
/// The front page's content stays reachable through its system path and any
/// aliases; all of those forms redirect to the root so only one URL serves
/// the landing page. Whether the request addresses the front page is decided
/// upstream and carried in [`RequestContext::is_front_page`].
pub struct FrontPage;

#[async_trait]
impl RedirectRule for FrontPage {
    fn kind(&self) -> RuleKind {
        RuleKind::FrontPage
    }

    fn priority(&self) -> i32 {
        60
    }

    fn enabled(&self, settings: &RedirectSettings) -> bool {
        settings.front_page
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        host: &HostServices,
    ) -> Result<Option<RedirectTarget>> {
        if !ctx.is_front_page {
            return Ok(None);
        }

        // Where the front page canonically lives, language prefix included.
        let Some(front) = host.routes().assemble_url(FRONT_PAGE, &ctx.language).await? else {
            return Ok(None);
        };

        let requested = host.languages().prefixed_path(&ctx.path, &ctx.language);
        if front.location == requested {
            return Ok(None);
        }

        Ok(Some(RedirectTarget::Routed(FRONT_PAGE.to_string())))
    }
}
