//! Path alias seam.

use anyhow::Result;
use async_trait::async_trait;

/// Host path-alias lookups.
///
/// Paths cross this boundary without leading slashes (`node/1`, `about`),
/// matching how alias storage keys them. Both lookups echo their input when
/// no alias record matches, so callers never branch on a miss.
#[async_trait]
pub trait AliasResolver: Send + Sync {
    /// Resolve an inbound path to the system path it aliases.
    async fn system_path(&self, path: &str, language: &str) -> Result<String>;

    /// Canonical alias for a system path.
    async fn alias_for(&self, system_path: &str, language: &str) -> Result<String>;
}
