//! Module registry seam.

use std::collections::HashSet;

use parking_lot::RwLock;

/// Which host modules are currently installed and enabled.
pub trait ModuleRegistry: Send + Sync {
    fn module_enabled(&self, name: &str) -> bool;
}

/// In-memory module registry with runtime toggling.
#[derive(Debug, Default)]
pub struct StaticModuleRegistry {
    enabled: RwLock<HashSet<String>>,
}

impl StaticModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the given modules enabled.
    pub fn with_enabled<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: RwLock::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Enable or disable a module at runtime.
    pub fn set_module_enabled(&self, name: &str, enabled: bool) {
        let mut set = self.enabled.write();
        if enabled {
            set.insert(name.to_string());
        } else {
            set.remove(name);
        }
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn module_enabled(&self, name: &str) -> bool {
        self.enabled.read().contains(name)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_nothing_enabled() {
        let registry = StaticModuleRegistry::new();
        assert!(!registry.module_enabled("taxonomy"));
    }

    #[test]
    fn with_enabled_seeds_modules() {
        let registry = StaticModuleRegistry::with_enabled(["taxonomy", "forum"]);
        assert!(registry.module_enabled("taxonomy"));
        assert!(registry.module_enabled("forum"));
        assert!(!registry.module_enabled("search"));
    }

    #[test]
    fn modules_toggle_at_runtime() {
        let registry = StaticModuleRegistry::new();
        registry.set_module_enabled("taxonomy", true);
        assert!(registry.module_enabled("taxonomy"));

        registry.set_module_enabled("taxonomy", false);
        assert!(!registry.module_enabled("taxonomy"));
    }
}
