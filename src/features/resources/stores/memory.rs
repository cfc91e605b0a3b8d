//! In-memory resource store for tests.
//!
//! Conditional updates run under one write lock so they behave like the
//! single-statement updates of the Postgres store.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

use super::{enrichment_fields, ResourceQuery, ResourceStore};
use crate::core::error::{AppError, Result};
use crate::features::resources::models::{
    EnrichmentStatus, EnrichmentWrite, Resource, ResourceStatus,
};
use crate::shared::constants::{NOTES_GENERATING, SUMMARY_GENERATING};

#[derive(Default)]
pub struct MemoryResourceStore {
    resources: RwLock<Vec<Resource>>,
    fail_reads: AtomicBool,
    deny_writes: AtomicBool,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `get` and `list` fail as an unreachable database would
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Makes every write fail with a permission error
    pub fn deny_writes(&self) {
        self.deny_writes.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.resources.read().unwrap().len()
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(AppError::PermissionDenied(
                "permission denied for table resources".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies `update` to the resource if `guard` holds, returning the new row
    fn update_if(
        &self,
        id: Uuid,
        guard: impl Fn(&Resource) -> bool,
        update: impl FnOnce(&mut Resource),
    ) -> Result<Option<Resource>> {
        self.check_write()?;
        let mut resources = self.resources.write().unwrap();

        Ok(resources
            .iter_mut()
            .find(|r| r.id == id && guard(r))
            .map(|resource| {
                update(resource);
                resource.updated_at = Utc::now();
                resource.clone()
            }))
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn insert(&self, resource: &Resource) -> Result<()> {
        self.check_write()?;
        self.resources.write().unwrap().push(resource.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resource>> {
        self.check_read()?;
        Ok(self
            .resources
            .read()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list(&self, query: &ResourceQuery) -> Result<Vec<Resource>> {
        self.check_read()?;
        Ok(self
            .resources
            .read()
            .unwrap()
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn mark_approved(
        &self,
        id: Uuid,
        content: &str,
        reviewer: &str,
    ) -> Result<Option<Resource>> {
        self.update_if(
            id,
            |r| r.status == ResourceStatus::Pending,
            |r| {
                r.status = ResourceStatus::Approved;
                r.content = content.to_string();
                r.summary = SUMMARY_GENERATING.to_string();
                r.short_notes = NOTES_GENERATING.to_string();
                r.enrichment_status = EnrichmentStatus::Generating;
                r.enrichment_attempt += 1;
                r.reviewed_at = Some(Utc::now());
                r.reviewed_by = Some(reviewer.to_string());
            },
        )
    }

    async fn mark_rejected(&self, id: Uuid, reviewer: &str) -> Result<Option<Resource>> {
        self.update_if(
            id,
            |r| r.status == ResourceStatus::Pending,
            |r| {
                r.status = ResourceStatus::Rejected;
                r.reviewed_at = Some(Utc::now());
                r.reviewed_by = Some(reviewer.to_string());
            },
        )
    }

    async fn restart_enrichment(&self, id: Uuid, attempt: i32) -> Result<Option<Resource>> {
        self.update_if(
            id,
            |r| r.status == ResourceStatus::Approved && r.enrichment_attempt == attempt,
            |r| {
                r.summary = SUMMARY_GENERATING.to_string();
                r.short_notes = NOTES_GENERATING.to_string();
                r.enrichment_status = EnrichmentStatus::Generating;
                r.enrichment_attempt += 1;
            },
        )
    }

    async fn write_enrichment(
        &self,
        id: Uuid,
        attempt: i32,
        write: &EnrichmentWrite,
    ) -> Result<bool> {
        let (summary, short_notes, status) = enrichment_fields(write);

        let updated = self.update_if(
            id,
            |r| r.enrichment_attempt == attempt,
            |r| {
                r.summary = summary.to_string();
                r.short_notes = short_notes.to_string();
                r.enrichment_status = status;
            },
        )?;

        Ok(updated.is_some())
    }
}
