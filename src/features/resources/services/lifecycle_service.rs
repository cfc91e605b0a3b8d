//! Resource lifecycle: upload, review, enrichment launch.
//!
//! Status only moves `pending -> approved` or `pending -> rejected`. Every
//! flip is a conditional update on `pending`, so concurrent reviewers cannot
//! both launch enrichment; the loser re-reads and reports the settled state.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::text_extraction::extract_text;
use crate::core::error::{AppError, Result};
use crate::features::catalogs::CatalogService;
use crate::features::resources::models::{
    EnrichmentJob, Resource, ResourceDetails, ReviewDecision, StoredFile, TransitionOutcome,
    UploadedFile,
};
use crate::features::resources::stores::ResourceStore;
use crate::features::resources::workers::EnrichmentSink;
use crate::modules::storage::BlobStore;
use crate::shared::constants::ALLOWED_MIME_TYPES;

pub struct LifecycleService {
    store: Arc<dyn ResourceStore>,
    blobs: Arc<dyn BlobStore>,
    enrichment: Arc<dyn EnrichmentSink>,
    catalogs: Arc<CatalogService>,
    max_file_size: usize,
}

impl LifecycleService {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        blobs: Arc<dyn BlobStore>,
        enrichment: Arc<dyn EnrichmentSink>,
        catalogs: Arc<CatalogService>,
        max_file_size: usize,
    ) -> Self {
        Self {
            store,
            blobs,
            enrichment,
            catalogs,
            max_file_size,
        }
    }

    fn check_file(&self, file: &UploadedFile) -> Result<()> {
        if file.bytes.is_empty() {
            return Err(AppError::Validation("File is empty".to_string()));
        }

        if file.bytes.len() > self.max_file_size {
            return Err(AppError::Validation(format!(
                "File exceeds the maximum size of {} MB",
                self.max_file_size / (1024 * 1024)
            )));
        }

        let mime = file.mime_type();
        if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
            return Err(AppError::Validation(format!(
                "File type '{}' is not allowed",
                mime
            )));
        }

        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Resource> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))
    }

    /// Stores the file and records a pending resource.
    ///
    /// If the insert fails after the upload, the blob stays behind.
    pub async fn create(
        &self,
        details: ResourceDetails,
        file: UploadedFile,
        uploader_id: &str,
    ) -> Result<Resource> {
        self.check_file(&file)?;

        let path = file.blob_path(uploader_id, Utc::now().timestamp_millis());
        let size = file.bytes.len() as i64;
        let content_type = file.mime_type();
        let blob = self.blobs.put(&path, file.bytes, &content_type).await?;

        let resource = Resource::pending(
            details,
            StoredFile {
                key: blob.key,
                url: blob.url,
                name: file.name,
                content_type,
                size,
            },
            uploader_id,
        );

        self.store.insert(&resource).await.inspect_err(|e| {
            tracing::error!(
                "Resource insert failed after upload; blob '{}' is orphaned: {}",
                resource.file_key,
                e
            );
        })?;

        tracing::info!(
            "Resource {} uploaded by {}: {}",
            resource.id,
            uploader_id,
            resource.title
        );

        self.catalogs
            .register(
                Some(&resource.university),
                Some(&resource.department),
                Some(&resource.subject),
            )
            .await;

        Ok(resource)
    }

    /// Applies a review decision.
    ///
    /// Repeating a decision returns the resource unchanged; reversing one fails
    /// with `InvalidTransition`. Approval returns once status and content are
    /// stored; the summary is produced in the background.
    pub async fn transition(
        &self,
        id: Uuid,
        decision: ReviewDecision,
        reviewer: &str,
    ) -> Result<Resource> {
        let resource = self.load(id).await?;

        match resource.status.apply(decision)? {
            TransitionOutcome::Unchanged => Ok(resource),
            TransitionOutcome::Applied(_) => match decision {
                ReviewDecision::Approved => self.approve(resource, reviewer).await,
                ReviewDecision::Rejected => self.reject(resource, reviewer).await,
            },
        }
    }

    async fn approve(&self, resource: Resource, reviewer: &str) -> Result<Resource> {
        let bytes = self.blobs.fetch(&resource.file_key).await?;
        let content = extract_text(&resource.file_name, &resource.content_type, &bytes);

        let Some(approved) = self
            .store
            .mark_approved(resource.id, &content, reviewer)
            .await?
        else {
            return self.settled(resource.id, ReviewDecision::Approved).await;
        };

        tracing::info!(
            "Resource {} approved by {}; enrichment attempt {} submitted",
            approved.id,
            reviewer,
            approved.enrichment_attempt
        );

        self.enrichment.submit(EnrichmentJob {
            resource_id: approved.id,
            attempt: approved.enrichment_attempt,
            text: content,
        });

        Ok(approved)
    }

    async fn reject(&self, resource: Resource, reviewer: &str) -> Result<Resource> {
        match self.store.mark_rejected(resource.id, reviewer).await? {
            Some(rejected) => {
                tracing::info!("Resource {} rejected by {}", rejected.id, reviewer);
                Ok(rejected)
            }
            None => self.settled(resource.id, ReviewDecision::Rejected).await,
        }
    }

    /// Another reviewer got there first. Report their result if it agrees
    /// with ours.
    async fn settled(&self, id: Uuid, decision: ReviewDecision) -> Result<Resource> {
        let current = self.load(id).await?;
        match current.status.apply(decision)? {
            TransitionOutcome::Unchanged => Ok(current),
            TransitionOutcome::Applied(_) => Err(AppError::Conflict(format!(
                "Resource {} changed during review, try again",
                id
            ))),
        }
    }

    /// Starts a fresh enrichment attempt for an approved resource with no job
    /// running in this process. A row left `generating` by a lost job (for
    /// example after a restart) can be retried too.
    pub async fn retry_enrichment(&self, id: Uuid) -> Result<Resource> {
        if self.enrichment.is_in_flight(id) {
            return Err(AppError::Conflict(format!(
                "Enrichment for resource {} is still running",
                id
            )));
        }

        let resource = self.load(id).await?;
        if !resource.is_approved() {
            return Err(AppError::Conflict(format!(
                "Resource {} is {}; only approved resources are enriched",
                id, resource.status
            )));
        }

        let restarted = self
            .store
            .restart_enrichment(id, resource.enrichment_attempt)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Enrichment for resource {} was restarted concurrently",
                    id
                ))
            })?;

        tracing::info!(
            "Enrichment retry for resource {} (attempt {})",
            id,
            restarted.enrichment_attempt
        );

        self.enrichment.submit(EnrichmentJob {
            resource_id: id,
            attempt: restarted.enrichment_attempt,
            text: restarted.content.clone(),
        });

        Ok(restarted)
    }
}
