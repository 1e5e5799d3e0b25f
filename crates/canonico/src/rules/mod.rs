//! Canonicalization rules.
//!
//! Each rule is an independent check over the request snapshot and the host
//! services. The decider runs them in descending priority order; the first
//! rule whose target survives the terminal checks produces the response.

pub mod clean_urls;
pub mod deslash;
pub mod forum_term;
pub mod front_page;
pub mod normalize_alias;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::RedirectSettings;
use crate::request::RequestContext;
use crate::services::HostServices;

pub use clean_urls::CleanUrls;
pub use deslash::Deslash;
pub use forum_term::ForumTerm;
pub use front_page::FrontPage;
pub use normalize_alias::NormalizeAlias;

/// Identifies a rule in decisions and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    CleanUrls,
    Deslash,
    FrontPage,
    NormalizeAlias,
    ForumTerm,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::CleanUrls => "clean_urls",
            RuleKind::Deslash => "deslash",
            RuleKind::FrontPage => "front_page",
            RuleKind::NormalizeAlias => "normalize_alias",
            RuleKind::ForumTerm => "forum_term",
        };
        f.write_str(name)
    }
}

/// Candidate produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Fully-formed location, served as-is without route or policy checks.
    Immediate(String),
    /// System path that must still pass route assembly and the policy gate.
    Routed(String),
}

/// A single canonicalization check.
#[async_trait]
pub trait RedirectRule: Send + Sync {
    /// Which rule this is, for decisions and logging.
    fn kind(&self) -> RuleKind;

    /// Priority of this rule (higher = checked first).
    fn priority(&self) -> i32;

    /// Whether the rule is switched on in the current settings.
    fn enabled(&self, settings: &RedirectSettings) -> bool;

    /// Inspect the request and produce a candidate target, or decline.
    ///
    /// Lookup misses decline with `Ok(None)`; only infrastructure failures
    /// return an error.
    async fn evaluate(
        &self,
        ctx: &RequestContext,
        host: &HostServices,
    ) -> Result<Option<RedirectTarget>>;
}

/// The standard rule chain, highest priority first.
pub fn default_rules() -> Vec<Arc<dyn RedirectRule>> {
    vec![
        Arc::new(CleanUrls),
        Arc::new(Deslash),
        Arc::new(FrontPage),
        Arc::new(NormalizeAlias),
        Arc::new(ForumTerm),
    ]
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn rule_kinds_display_as_snake_case() {
        assert_eq!(RuleKind::CleanUrls.to_string(), "clean_urls");
        assert_eq!(RuleKind::NormalizeAlias.to_string(), "normalize_alias");
    }

    #[test]
    fn default_rules_come_pre_sorted() {
        let rules = default_rules();
        let priorities: Vec<i32> = rules.iter().map(|r| r.priority()).collect();

        let mut sorted = priorities.clone();
        sorted.sort_by_key(|p| std::cmp::Reverse(*p));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn default_rules_cover_every_kind() {
        let kinds: Vec<RuleKind> = default_rules().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::CleanUrls,
                RuleKind::Deslash,
                RuleKind::FrontPage,
                RuleKind::NormalizeAlias,
                RuleKind::ForumTerm,
            ]
        );
    }

    #[test]
    fn enabled_flags_map_to_settings() {
        let mut settings = RedirectSettings::all_disabled();
        settings.deslash = true;

        for rule in default_rules() {
            let expected = rule.kind() == RuleKind::Deslash;
            assert_eq!(rule.enabled(&settings), expected, "{}", rule.kind());
        }
    }
}
