//! Persistence for resources.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::resources::models::{
    EnrichmentStatus, EnrichmentWrite, Resource, ResourceStatus,
};
use crate::shared::constants::{NOTES_FAILED, SUMMARY_FAILED};

#[cfg(test)]
pub use memory::MemoryResourceStore;
pub use postgres::PgResourceStore;

/// Selection for `ResourceStore::list`; unset fields do not filter
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub status: Option<ResourceStatus>,
    pub uploader_id: Option<String>,
}

impl ResourceQuery {
    pub fn with_status(status: ResourceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn by_uploader(uploader_id: &str) -> Self {
        Self {
            uploader_id: Some(uploader_id.to_string()),
            ..Default::default()
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.status.is_none_or(|status| resource.status == status)
            && self
                .uploader_id
                .as_deref()
                .is_none_or(|uploader| resource.uploader_id == uploader)
    }
}

/// Typed access to the resource table.
///
/// The conditional updates are the only synchronization between concurrent
/// reviewers and enrichment jobs: each returns `None`/`false` when its guard
/// no longer holds instead of overwriting.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn insert(&self, resource: &Resource) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<Resource>>;

    /// Matching resources in creation order
    async fn list(&self, query: &ResourceQuery) -> Result<Vec<Resource>>;

    /// Flips a pending resource to approved, stores its content and starts
    /// enrichment attempt `n + 1`. `None` if the resource was not pending.
    async fn mark_approved(&self, id: Uuid, content: &str, reviewer: &str)
        -> Result<Option<Resource>>;

    /// Flips a pending resource to rejected. `None` if it was not pending.
    async fn mark_rejected(&self, id: Uuid, reviewer: &str) -> Result<Option<Resource>>;

    /// Starts a new enrichment attempt for an approved resource if `attempt`
    /// is still its current attempt. `None` otherwise.
    async fn restart_enrichment(&self, id: Uuid, attempt: i32) -> Result<Option<Resource>>;

    /// Stores an enrichment result if `attempt` is still the current attempt.
    /// Returns whether the write landed.
    async fn write_enrichment(&self, id: Uuid, attempt: i32, write: &EnrichmentWrite)
        -> Result<bool>;
}

/// Summary, notes and status persisted for an enrichment outcome
fn enrichment_fields(write: &EnrichmentWrite) -> (&str, &str, EnrichmentStatus) {
    match write {
        EnrichmentWrite::Completed {
            summary,
            short_notes,
        } => (summary, short_notes, EnrichmentStatus::Completed),
        EnrichmentWrite::Failed => (SUMMARY_FAILED, NOTES_FAILED, EnrichmentStatus::Failed),
    }
}
