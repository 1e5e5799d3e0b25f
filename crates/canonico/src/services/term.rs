//! Taxonomy term storage seam.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A taxonomy term as the forum-term rule sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub id: u64,
    pub label: String,
    /// Canonical rooted URL path for the term (e.g. `/forum/5`).
    pub path: String,
}

/// Host taxonomy storage.
#[async_trait]
pub trait TermStorage: Send + Sync {
    /// Load a term by numeric id. `None` when no such term exists.
    async fn load_term(&self, id: u64) -> Result<Option<TaxonomyTerm>>;
}

/// Term storage for hosts without a taxonomy subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTerms;

#[async_trait]
impl TermStorage for EmptyTerms {
    async fn load_term(&self, _id: u64) -> Result<Option<TaxonomyTerm>> {
        Ok(None)
    }
}
