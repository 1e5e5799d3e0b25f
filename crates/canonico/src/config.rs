//! Redirect settings and the host configuration seam.
//!
//! Hosts keep module configuration as JSON-valued keys; the settings for this
//! module live under [`SETTINGS_KEY`]. Settings are loaded fresh once per
//! request cycle through [`ConfigStore`], never cached here.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Config key the redirect settings are stored under.
pub const SETTINGS_KEY: &str = "canonico.settings";

/// Per-rule enable flags. Everything defaults to enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectSettings {
    /// Strip the `index.php` dispatch script from URIs.
    pub clean_urls: bool,
    /// Remove trailing slashes.
    pub deslash: bool,
    /// Collapse front-page requests onto the site root.
    pub front_page: bool,
    /// Redirect content onto its canonical alias.
    pub normalize_aliases: bool,
    /// Redirect raw `taxonomy/term/N` URIs to the term's own URL.
    pub forum_term: bool,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            clean_urls: true,
            deslash: true,
            front_page: true,
            normalize_aliases: true,
            forum_term: true,
        }
    }
}

impl RedirectSettings {
    /// All rules switched off.
    pub fn all_disabled() -> Self {
        Self {
            clean_urls: false,
            deslash: false,
            front_page: false,
            normalize_aliases: false,
            forum_term: false,
        }
    }

    /// Decode settings from a JSON config value.
    ///
    /// Missing fields take their defaults; a value that is not an object at
    /// all falls back to defaults entirely.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed redirect settings, using defaults");
            Self::default()
        })
    }
}

/// Host configuration the redirect rules consult.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current redirect settings.
    async fn redirect_settings(&self) -> Result<RedirectSettings>;

    /// System path of the configured front page, when one is set.
    async fn front_page(&self) -> Result<Option<String>>;
}

/// Fixed configuration, for hosts that configure the module from their own
/// config files rather than a live store.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigStore {
    settings: RedirectSettings,
    front_page: Option<String>,
}

impl StaticConfigStore {
    pub fn new(settings: RedirectSettings) -> Self {
        Self {
            settings,
            front_page: None,
        }
    }

    /// Set the front-page system path.
    pub fn with_front_page(mut self, path: &str) -> Self {
        self.front_page = Some(path.to_string());
        self
    }
}

#[async_trait]
impl ConfigStore for StaticConfigStore {
    async fn redirect_settings(&self) -> Result<RedirectSettings> {
        Ok(self.settings.clone())
    }

    async fn front_page(&self) -> Result<Option<String>> {
        Ok(self.front_page.clone())
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_rule() {
        let settings = RedirectSettings::default();
        assert!(settings.clean_urls);
        assert!(settings.deslash);
        assert!(settings.front_page);
        assert!(settings.normalize_aliases);
        assert!(settings.forum_term);
    }

    #[test]
    fn all_disabled_switches_every_rule_off() {
        let settings = RedirectSettings::all_disabled();
        assert!(!settings.clean_urls);
        assert!(!settings.deslash);
        assert!(!settings.front_page);
        assert!(!settings.normalize_aliases);
        assert!(!settings.forum_term);
    }

    #[test]
    fn partial_json_fills_missing_fields_with_defaults() {
        let settings = RedirectSettings::from_value(serde_json::json!({ "deslash": false }));
        assert!(!settings.deslash);
        assert!(settings.clean_urls);
        assert!(settings.forum_term);
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let settings = RedirectSettings::from_value(serde_json::json!("not an object"));
        assert_eq!(settings, RedirectSettings::default());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = RedirectSettings::all_disabled();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(RedirectSettings::from_value(value), settings);
    }

    #[test]
    fn settings_key_lookup_from_config_blob() {
        // The shape a host config table would hand back for our namespace.
        let blob = serde_json::json!({ SETTINGS_KEY: { "front_page": false } });
        let settings = RedirectSettings::from_value(blob[SETTINGS_KEY].clone());
        assert!(!settings.front_page);
        assert!(settings.deslash);
    }

    #[tokio::test]
    async fn static_store_serves_settings_and_front_page() {
        let store =
            StaticConfigStore::new(RedirectSettings::all_disabled()).with_front_page("node/1");
        assert_eq!(
            store.redirect_settings().await.unwrap(),
            RedirectSettings::all_disabled()
        );
        assert_eq!(store.front_page().await.unwrap().as_deref(), Some("node/1"));
    }

    #[tokio::test]
    async fn static_store_defaults_to_no_front_page() {
        let store = StaticConfigStore::default();
        assert_eq!(store.front_page().await.unwrap(), None);
    }
}
