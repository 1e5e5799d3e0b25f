//! Canonical-URL request interception for axum content frameworks.
//!
//! Inspects inbound requests before routing and issues 301 redirects that
//! canonicalize URLs: stripping the `index.php` dispatch script, removing
//! trailing slashes, normalizing paths to their canonical aliases, collapsing
//! front-page duplicates onto the site root, and fixing raw forum taxonomy
//! links.
//!
//! The crate owns no storage and no routing table. Every fact it needs is
//! queried through the trait seams in [`services`], which the embedding
//! framework implements; [`services::HostServices`] bundles them for the
//! middleware. Rules are evaluated in a fixed priority order and the first
//! rule whose target survives route assembly and the policy gate wins; a
//! target with no matching route, or one the policy refuses, declines
//! silently and later rules still run.
//!
//! Mounting the middleware on a router:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use anyhow::Result;
//! use async_trait::async_trait;
//! use axum::{Router, middleware};
//! use canonico::{
//!     AliasResolver, AssembledUrl, HostServices, RedirectDecider, RouteMatcher,
//!     canonicalize_request,
//! };
//!
//! // The host's alias storage.
//! struct Aliases;
//!
//! #[async_trait]
//! impl AliasResolver for Aliases {
//!     async fn system_path(&self, path: &str, _language: &str) -> Result<String> {
//!         Ok(path.to_string())
//!     }
//!
//!     async fn alias_for(&self, system_path: &str, _language: &str) -> Result<String> {
//!         Ok(system_path.to_string())
//!     }
//! }
//!
//! // The host's router, exposed as route matching + URL generation.
//! struct Routes;
//!
//! #[async_trait]
//! impl RouteMatcher for Routes {
//!     async fn assemble_url(&self, path: &str, _language: &str) -> Result<Option<AssembledUrl>> {
//!         Ok(Some(AssembledUrl {
//!             route: "content.view".to_string(),
//!             location: format!("/{path}"),
//!         }))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let host = HostServices::builder()
//!         .aliases(Arc::new(Aliases))
//!         .routes(Arc::new(Routes))
//!         .build()?;
//!
//!     let app: Router = Router::new().layer(middleware::from_fn_with_state(
//!         RedirectDecider::new(host),
//!         canonicalize_request,
//!     ));
//!     # let _ = app;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod decider;
pub mod error;
pub mod middleware;
pub mod request;
pub mod rules;
pub mod services;

pub use config::{ConfigStore, RedirectSettings, SETTINGS_KEY, StaticConfigStore};
pub use decider::{RedirectDecider, RedirectDecision};
pub use error::{RedirectError, RedirectResult};
pub use middleware::{REVALIDATE_CACHE_CONTROL, canonicalize_request};
pub use request::{ExceptionStatus, NegotiatedLanguage, RequestContext, SkipPageCache};
pub use rules::{RedirectRule, RedirectTarget, RuleKind, default_rules};
pub use services::{
    AliasResolver, AssembledUrl, EmptyTerms, FRONT_PAGE, HostServices, HostServicesBuilder,
    LanguageManager, ModuleRegistry, PathPrefixPolicy, PrefixLanguageManager, RedirectPolicy,
    RouteMatcher, StaticModuleRegistry, TaxonomyTerm, TermStorage,
};
