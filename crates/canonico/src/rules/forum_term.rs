//! Forum taxonomy-term canonicalization.

use std::sync::LazyLock;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind};
use crate::services::HostServices;

/// Module that must be enabled for term pages to exist.
const TAXONOMY_MODULE: &str = "taxonomy";

/// Matches `taxonomy/term/<id>` at the end of a URI.
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static TERM_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"taxonomy/term/([0-9]+)$").expect("valid regex literal"));

/// Redirects raw `taxonomy/term/N` URIs to the term's canonical URL.
///
/// Forum containers and other term-backed pages publish their own URLs; the
/// raw term form must not serve the same content twice. A URI with a query
/// string never matches, since the id has to sit at the very end.
pub struct ForumTerm;

/// Term id when the URI addresses a raw taxonomy term page.
fn term_id(uri: &str) -> Option<u64> {
    let caps = TERM_URI.captures(uri)?;
    caps.get(1)?.as_str().parse().ok()
}

#[async_trait]
impl RedirectRule for ForumTerm {
    fn kind(&self) -> RuleKind {
        RuleKind::ForumTerm
    }

    fn priority(&self) -> i32 {
        20
    }

    fn enabled(&self, settings: &RedirectSettings) -> bool {
        settings.forum_term
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        host: &HostServices,
    ) -> Result<Option<RedirectTarget>> {
        if !host.modules().module_enabled(TAXONOMY_MODULE) {
            return Ok(None);
        }

        let Some(id) = term_id(&ctx.uri) else {
            return Ok(None);
        };

        let Some(term) = host.terms().load_term(id).await? else {
            tracing::debug!(term = id, "taxonomy term does not exist");
            return Ok(None);
        };

        let requested = host.languages().prefixed_path(&ctx.path, &ctx.language);
        if term.path == requested {
            return Ok(None);
        }

        tracing::debug!(
            term = id,
            label = %term.label,
            path = %term.path,
            "term is served under its own URL"
        );
        let system = host
            .aliases()
            .system_path(term.path.trim_start_matches('/'), &ctx.language)
            .await?;
        Ok(Some(RedirectTarget::Routed(system)))
    }
}
