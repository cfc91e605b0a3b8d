use async_trait::async_trait;
use sqlx::PgPool;

use super::CatalogStore;
use crate::core::error::{AppError, Result};
use crate::features::catalogs::models::{CatalogEntry, CatalogKind};

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn add(&self, kind: CatalogKind, value: &str, parent: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO catalog_entries (kind, value, parent)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, value, parent) DO NOTHING
            "#,
        )
        .bind(kind)
        .bind(value)
        .bind(parent)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add {} '{}': {:?}", kind, value, e);
            AppError::from(e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
        sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT kind, value, parent, created_at
            FROM catalog_entries
            WHERE kind = $1
            ORDER BY created_at ASC, value ASC
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list {} catalog: {:?}", kind, e);
            AppError::from(e)
        })
    }
}
