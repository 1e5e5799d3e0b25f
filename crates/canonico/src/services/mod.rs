//! Host service seams consumed by the redirect rules.
//!
//! Every capability the rules need from the surrounding framework is an
//! injected trait object, bundled in [`HostServices`]. Nothing is read from
//! global state, which keeps rule evaluation deterministic and testable.

pub mod alias;
pub mod language;
pub mod modules;
pub mod policy;
pub mod routing;
pub mod term;

use std::sync::Arc;

use crate::config::{ConfigStore, StaticConfigStore};
use crate::error::RedirectError;

pub use alias::AliasResolver;
pub use language::{LanguageManager, PrefixLanguageManager};
pub use modules::{ModuleRegistry, StaticModuleRegistry};
pub use policy::{PathPrefixPolicy, RedirectPolicy};
pub use routing::{AssembledUrl, FRONT_PAGE, RouteMatcher};
pub use term::{EmptyTerms, TaxonomyTerm, TermStorage};

/// Shared bundle of host services.
///
/// Cheap to clone; everything lives behind a single `Arc`.
#[derive(Clone)]
pub struct HostServices {
    inner: Arc<HostServicesInner>,
}

struct HostServicesInner {
    config: Arc<dyn ConfigStore>,
    aliases: Arc<dyn AliasResolver>,
    languages: Arc<dyn LanguageManager>,
    modules: Arc<dyn ModuleRegistry>,
    terms: Arc<dyn TermStorage>,
    routes: Arc<dyn RouteMatcher>,
    policy: Arc<dyn RedirectPolicy>,
}

impl HostServices {
    pub fn builder() -> HostServicesBuilder {
        HostServicesBuilder::default()
    }

    pub fn config(&self) -> &dyn ConfigStore {
        self.inner.config.as_ref()
    }

    pub fn aliases(&self) -> &dyn AliasResolver {
        self.inner.aliases.as_ref()
    }

    pub fn languages(&self) -> &dyn LanguageManager {
        self.inner.languages.as_ref()
    }

    pub fn modules(&self) -> &dyn ModuleRegistry {
        self.inner.modules.as_ref()
    }

    pub fn terms(&self) -> &dyn TermStorage {
        self.inner.terms.as_ref()
    }

    pub fn routes(&self) -> &dyn RouteMatcher {
        self.inner.routes.as_ref()
    }

    pub fn policy(&self) -> &dyn RedirectPolicy {
        self.inner.policy.as_ref()
    }
}

/// Builder for [`HostServices`].
///
/// An alias resolver and a route matcher are required; everything else has
/// a standalone default (static config, single-language site, no modules,
/// no terms, path-prefix policy).
#[derive(Default)]
pub struct HostServicesBuilder {
    config: Option<Arc<dyn ConfigStore>>,
    aliases: Option<Arc<dyn AliasResolver>>,
    languages: Option<Arc<dyn LanguageManager>>,
    modules: Option<Arc<dyn ModuleRegistry>>,
    terms: Option<Arc<dyn TermStorage>>,
    routes: Option<Arc<dyn RouteMatcher>>,
    policy: Option<Arc<dyn RedirectPolicy>>,
}

impl HostServicesBuilder {
    pub fn config(mut self, config: Arc<dyn ConfigStore>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn aliases(mut self, aliases: Arc<dyn AliasResolver>) -> Self {
        self.aliases = Some(aliases);
        self
    }

    pub fn languages(mut self, languages: Arc<dyn LanguageManager>) -> Self {
        self.languages = Some(languages);
        self
    }

    pub fn modules(mut self, modules: Arc<dyn ModuleRegistry>) -> Self {
        self.modules = Some(modules);
        self
    }

    pub fn terms(mut self, terms: Arc<dyn TermStorage>) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn routes(mut self, routes: Arc<dyn RouteMatcher>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn policy(mut self, policy: Arc<dyn RedirectPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<HostServices, RedirectError> {
        let aliases = self
            .aliases
            .ok_or(RedirectError::MissingService("alias resolver"))?;
        let routes = self
            .routes
            .ok_or(RedirectError::MissingService("route matcher"))?;

        Ok(HostServices {
            inner: Arc::new(HostServicesInner {
                config: self
                    .config
                    .unwrap_or_else(|| Arc::new(StaticConfigStore::default())),
                aliases,
                languages: self
                    .languages
                    .unwrap_or_else(|| Arc::new(PrefixLanguageManager::single("en"))),
                modules: self
                    .modules
                    .unwrap_or_else(|| Arc::new(StaticModuleRegistry::new())),
                terms: self.terms.unwrap_or_else(|| Arc::new(EmptyTerms)),
                routes,
                policy: self
                    .policy
                    .unwrap_or_else(|| Arc::new(PathPrefixPolicy::default())),
            }),
        })
    }
}
