//! Clean-URL redirect: strip the `index.php` dispatch script from URIs.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::rules::{RedirectRule, RedirectTarget, RuleKind};
use crate::services::HostServices;

/// Redirects `/index.php?q=node/1` style URIs to their clean form.
///
/// The trigger is a plain substring search for `index.php` anywhere in the
/// URI, and removal covers only the first `/index.php` occurrence. Both are
/// long-standing quirks kept for parity with sites already relying on them.
/// The target is served directly, with no route or policy checks.
pub struct CleanUrls;

/// Strip the first `/index.php` occurrence from a URI, re-rooting the result
/// when the script name was the entire path.
fn strip_index_php(uri: &str) -> String {
    let stripped = uri.replacen("/index.php", "", 1);
    if stripped.is_empty() || stripped.starts_with('?') {
        format!("/{stripped}")
    } else {
        stripped
    }
}

#[async_trait]
impl RedirectRule for CleanUrls {
    fn kind(&self) -> RuleKind {
        RuleKind::CleanUrls
    }

    fn priority(&self) -> i32 {
        100
    }

    fn enabled(&self, settings: &RedirectSettings) -> bool {
        settings.clean_urls
    }

    async fn evaluate(
        &self,
        ctx: &RequestContext,
        _host: &HostServices,
    ) -> Result<Option<RedirectTarget>> {
        if !ctx.uri.contains("index.php") {
            return Ok(None);
        }
        Ok(Some(RedirectTarget::Immediate(strip_index_php(&ctx.uri))))
    }
}
