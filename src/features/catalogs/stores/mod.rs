#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::catalogs::models::{CatalogEntry, CatalogKind};

#[cfg(test)]
pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Append-only catalog storage
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Adds the value unless it already exists. Returns whether it was added.
    async fn add(&self, kind: CatalogKind, value: &str, parent: &str) -> Result<bool>;

    /// Every entry of a kind in insertion order
    async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>>;
}
