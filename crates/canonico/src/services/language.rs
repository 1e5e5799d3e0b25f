//! Language facts needed for URL comparisons.

use std::collections::HashSet;

/// Host language configuration.
///
/// The middleware runs after the host's language negotiation has stripped
/// any URL prefix, so the rules reconstruct outward-facing paths through
/// [`prefixed_path`](LanguageManager::prefixed_path) when comparing against
/// what the browser actually requested.
pub trait LanguageManager: Send + Sync {
    /// The site default language id.
    fn default_language(&self) -> &str;

    /// Re-apply the host's URL language prefix to a rooted path.
    fn prefixed_path(&self, path: &str, language: &str) -> String;
}

/// Prefix-based language manager.
///
/// Non-default known languages carry a `/{language}` URL prefix; the default
/// language stays bare so `/en/about` and `/about` never both serve the same
/// page. Unknown languages are treated as the default.
pub struct PrefixLanguageManager {
    known_languages: HashSet<String>,
    default_language: String,
}

impl PrefixLanguageManager {
    pub fn new(known_languages: Vec<String>, default_language: String) -> Self {
        Self {
            known_languages: known_languages.into_iter().collect(),
            default_language,
        }
    }

    /// Single-language site in `language`.
    pub fn single(language: &str) -> Self {
        Self::new(vec![language.to_string()], language.to_string())
    }
}

impl LanguageManager for PrefixLanguageManager {
    fn default_language(&self) -> &str {
        &self.default_language
    }

    fn prefixed_path(&self, path: &str, language: &str) -> String {
        if language == self.default_language || !self.known_languages.contains(language) {
            return path.to_string();
        }
        if path == "/" {
            format!("/{language}")
        } else {
            format!("/{language}{path}")
        }
    }
}
