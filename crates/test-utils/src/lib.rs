//! Canonico test utilities.
//!
//! In-memory host services for exercising the redirect pipeline without a
//! real framework behind it: alias tables, route tables, taxonomy terms,
//! and a fluent [`TestHost`] fixture bundling them.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use parking_lot::RwLock;

use canonico::{
    AliasResolver, AssembledUrl, FRONT_PAGE, HostServices, LanguageManager, PrefixLanguageManager,
    RedirectDecider, RedirectPolicy, RedirectSettings, RouteMatcher, StaticConfigStore,
    StaticModuleRegistry, TaxonomyTerm, TermStorage,
};

/// In-memory alias table: bidirectional system path ↔ alias, per language.
///
/// Misses echo the input, matching host alias-manager semantics.
#[derive(Debug, Default)]
pub struct MemoryAliasResolver {
    // (language, alias) → system path
    to_system: RwLock<HashMap<(String, String), String>>,
    // (language, system path) → alias
    to_alias: RwLock<HashMap<(String, String), String>>,
}

impl MemoryAliasResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias for a system path in a language.
    pub fn insert(&self, system_path: &str, alias: &str, language: &str) {
        self.to_system
            .write()
            .insert((language.to_string(), alias.to_string()), system_path.to_string());
        self.to_alias
            .write()
            .insert((language.to_string(), system_path.to_string()), alias.to_string());
    }
}

#[async_trait]
impl AliasResolver for MemoryAliasResolver {
    async fn system_path(&self, path: &str, language: &str) -> Result<String> {
        Ok(self
            .to_system
            .read()
            .get(&(language.to_string(), path.to_string()))
            .cloned()
            .unwrap_or_else(|| path.to_string()))
    }

    async fn alias_for(&self, system_path: &str, language: &str) -> Result<String> {
        Ok(self
            .to_alias
            .read()
            .get(&(language.to_string(), system_path.to_string()))
            .cloned()
            .unwrap_or_else(|| system_path.to_string()))
    }
}

/// Alias resolver that always fails, for error-path tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAliasResolver;

#[async_trait]
impl AliasResolver for FailingAliasResolver {
    async fn system_path(&self, _path: &str, _language: &str) -> Result<String> {
        Err(anyhow!("alias backend offline"))
    }

    async fn alias_for(&self, _system_path: &str, _language: &str) -> Result<String> {
        Err(anyhow!("alias backend offline"))
    }
}

/// In-memory route table keyed by system path.
///
/// Outbound locations are generated the way a host would: canonical alias
/// looked up through the shared alias table, then the language prefix
/// applied. The front-page sentinel maps to the configured front route with
/// the (prefixed) site root as location.
pub struct MemoryRouteMatcher {
    routes: RwLock<HashMap<String, String>>,
    front_route: RwLock<Option<String>>,
    aliases: Arc<MemoryAliasResolver>,
    languages: Arc<PrefixLanguageManager>,
}

impl MemoryRouteMatcher {
    pub fn new(aliases: Arc<MemoryAliasResolver>, languages: Arc<PrefixLanguageManager>) -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            front_route: RwLock::new(None),
            aliases,
            languages,
        }
    }

    /// Register a route serving a system path.
    pub fn insert(&self, system_path: &str, route: &str) {
        self.routes
            .write()
            .insert(system_path.to_string(), route.to_string());
    }

    /// Set the route serving the front page.
    pub fn set_front_route(&self, route: &str) {
        *self.front_route.write() = Some(route.to_string());
    }
}

#[async_trait]
impl RouteMatcher for MemoryRouteMatcher {
    async fn assemble_url(&self, path: &str, language: &str) -> Result<Option<AssembledUrl>> {
        if path == FRONT_PAGE {
            let Some(route) = self.front_route.read().clone() else {
                return Ok(None);
            };
            return Ok(Some(AssembledUrl {
                route,
                location: self.languages.prefixed_path("/", language),
            }));
        }

        let trimmed = path.trim_matches('/');
        let Some(route) = self.routes.read().get(trimmed).cloned() else {
            return Ok(None);
        };

        let alias = self.aliases.alias_for(trimmed, language).await?;
        Ok(Some(AssembledUrl {
            route,
            location: self.languages.prefixed_path(&format!("/{alias}"), language),
        }))
    }
}

/// In-memory taxonomy term storage.
#[derive(Debug, Default)]
pub struct MemoryTermStorage {
    terms: RwLock<HashMap<u64, TaxonomyTerm>>,
}

impl MemoryTermStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, term: TaxonomyTerm) {
        self.terms.write().insert(term.id, term);
    }
}

#[async_trait]
impl TermStorage for MemoryTermStorage {
    async fn load_term(&self, id: u64) -> Result<Option<TaxonomyTerm>> {
        Ok(self.terms.read().get(&id).cloned())
    }
}

/// Create a taxonomy term fixture.
pub fn test_term(id: u64, label: &str, path: &str) -> TaxonomyTerm {
    TaxonomyTerm {
        id,
        label: label.to_string(),
        path: path.to_string(),
    }
}

/// Create a host fixture with empty tables.
pub fn test_host() -> TestHost {
    TestHost::new()
}

/// Host services whose alias resolver always fails, for error-path tests.
#[allow(clippy::expect_used)]
pub fn failing_host() -> HostServices {
    let languages = Arc::new(PrefixLanguageManager::single("en"));
    let aliases = Arc::new(MemoryAliasResolver::new());
    let routes = Arc::new(MemoryRouteMatcher::new(aliases, languages.clone()));

    HostServices::builder()
        .aliases(Arc::new(FailingAliasResolver))
        .languages(languages)
        .routes(routes)
        .build()
        .expect("required services are set")
}

/// Fluent host fixture.
///
/// Defaults: languages "en" (default) and "fr", every redirect rule
/// enabled, no front page, empty alias/route/term tables, no modules,
/// default path-prefix policy.
pub struct TestHost {
    pub aliases: Arc<MemoryAliasResolver>,
    pub routes: Arc<MemoryRouteMatcher>,
    pub terms: Arc<MemoryTermStorage>,
    pub modules: Arc<StaticModuleRegistry>,
    languages: Arc<PrefixLanguageManager>,
    settings: RedirectSettings,
    front_page: Option<String>,
    policy: Option<Arc<dyn RedirectPolicy>>,
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHost {
    pub fn new() -> Self {
        let languages = Arc::new(PrefixLanguageManager::new(
            vec!["en".to_string(), "fr".to_string()],
            "en".to_string(),
        ));
        let aliases = Arc::new(MemoryAliasResolver::new());
        let routes = Arc::new(MemoryRouteMatcher::new(aliases.clone(), languages.clone()));

        Self {
            aliases,
            routes,
            terms: Arc::new(MemoryTermStorage::new()),
            modules: Arc::new(StaticModuleRegistry::new()),
            languages,
            settings: RedirectSettings::default(),
            front_page: None,
            policy: None,
        }
    }

    /// Register an alias in the default language.
    pub fn with_alias(self, system_path: &str, alias: &str) -> Self {
        self.aliases.insert(system_path, alias, "en");
        self
    }

    /// Register an alias in a specific language.
    pub fn with_alias_in(self, system_path: &str, alias: &str, language: &str) -> Self {
        self.aliases.insert(system_path, alias, language);
        self
    }

    /// Register a route serving a system path.
    pub fn with_route(self, system_path: &str, route: &str) -> Self {
        self.routes.insert(system_path, route);
        self
    }

    /// Configure the front page: its system path and the route serving it.
    pub fn with_front_page(mut self, system_path: &str, route: &str) -> Self {
        self.front_page = Some(system_path.to_string());
        self.routes.set_front_route(route);
        self
    }

    /// Add a taxonomy term.
    pub fn with_term(self, term: TaxonomyTerm) -> Self {
        self.terms.insert(term);
        self
    }

    /// Enable a host module.
    pub fn with_module(self, name: &str) -> Self {
        self.modules.set_module_enabled(name, true);
        self
    }

    /// Replace the redirect settings.
    pub fn with_settings(mut self, settings: RedirectSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the redirect policy.
    pub fn with_policy(mut self, policy: Arc<dyn RedirectPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Assemble the service bundle.
    #[allow(clippy::expect_used)]
    pub fn services(&self) -> HostServices {
        let mut config = StaticConfigStore::new(self.settings.clone());
        if let Some(front) = &self.front_page {
            config = config.with_front_page(front);
        }

        let mut builder = HostServices::builder()
            .config(Arc::new(config))
            .aliases(self.aliases.clone())
            .languages(self.languages.clone())
            .modules(self.modules.clone())
            .terms(self.terms.clone())
            .routes(self.routes.clone());
        if let Some(policy) = &self.policy {
            builder = builder.policy(policy.clone());
        }

        builder.build().expect("required services are set")
    }

    /// Decider over the assembled services, with the standard rule chain.
    pub fn decider(&self) -> RedirectDecider {
        RedirectDecider::new(self.services())
    }
}
