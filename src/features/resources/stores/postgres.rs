use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{enrichment_fields, ResourceQuery, ResourceStore};
use crate::core::error::{AppError, Result};
use crate::features::resources::models::{EnrichmentWrite, Resource};
use crate::shared::constants::{NOTES_GENERATING, SUMMARY_GENERATING};

const RESOURCE_COLUMNS: &str = r#"
    id, title, description, university, department, semester, subject,
    file_type, tags, file_key, file_url, file_name, content_type, file_size,
    status, content, summary, short_notes, enrichment_status, enrichment_attempt,
    uploader_id, created_at, updated_at, reviewed_at, reviewed_by
"#;

fn db_error(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::from(e)
    }
}

pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn insert(&self, resource: &Resource) -> Result<()> {
        sqlx::query(&format!(
            "INSERT INTO resources ({RESOURCE_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, \
              $19, $20, $21, $22, $23, $24, $25)"
        ))
        .bind(resource.id)
        .bind(&resource.title)
        .bind(&resource.description)
        .bind(&resource.university)
        .bind(&resource.department)
        .bind(&resource.semester)
        .bind(&resource.subject)
        .bind(resource.file_type)
        .bind(&resource.tags)
        .bind(&resource.file_key)
        .bind(&resource.file_url)
        .bind(&resource.file_name)
        .bind(&resource.content_type)
        .bind(resource.file_size)
        .bind(resource.status)
        .bind(&resource.content)
        .bind(&resource.summary)
        .bind(&resource.short_notes)
        .bind(resource.enrichment_status)
        .bind(resource.enrichment_attempt)
        .bind(&resource.uploader_id)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .bind(resource.reviewed_at)
        .bind(&resource.reviewed_by)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert resource"))?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get resource"))
    }

    async fn list(&self, query: &ResourceQuery) -> Result<Vec<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             WHERE ($1::resource_status IS NULL OR status = $1) \
             AND ($2::text IS NULL OR uploader_id = $2) \
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(query.status)
        .bind(query.uploader_id.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list resources"))
    }

    async fn mark_approved(
        &self,
        id: Uuid,
        content: &str,
        reviewer: &str,
    ) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET \
                status = 'approved', content = $2, summary = $3, short_notes = $4, \
                enrichment_status = 'generating', enrichment_attempt = enrichment_attempt + 1, \
                reviewed_at = NOW(), reviewed_by = $5, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(id)
        .bind(content)
        .bind(SUMMARY_GENERATING)
        .bind(NOTES_GENERATING)
        .bind(reviewer)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to approve resource"))
    }

    async fn mark_rejected(&self, id: Uuid, reviewer: &str) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET \
                status = 'rejected', reviewed_at = NOW(), reviewed_by = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(id)
        .bind(reviewer)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to reject resource"))
    }

    async fn restart_enrichment(&self, id: Uuid, attempt: i32) -> Result<Option<Resource>> {
        sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET \
                summary = $3, short_notes = $4, enrichment_status = 'generating', \
                enrichment_attempt = enrichment_attempt + 1, updated_at = NOW() \
             WHERE id = $1 AND status = 'approved' AND enrichment_attempt = $2 \
             RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(id)
        .bind(attempt)
        .bind(SUMMARY_GENERATING)
        .bind(NOTES_GENERATING)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to restart enrichment"))
    }

    async fn write_enrichment(
        &self,
        id: Uuid,
        attempt: i32,
        write: &EnrichmentWrite,
    ) -> Result<bool> {
        let (summary, short_notes, status) = enrichment_fields(write);

        let result = sqlx::query(
            "UPDATE resources SET \
                summary = $3, short_notes = $4, enrichment_status = $5, updated_at = NOW() \
             WHERE id = $1 AND enrichment_attempt = $2",
        )
        .bind(id)
        .bind(attempt)
        .bind(summary)
        .bind(short_notes)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to write enrichment result"))?;

        Ok(result.rows_affected() == 1)
    }
}
