use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::CatalogStore;
use crate::core::error::{AppError, Result};
use crate::features::catalogs::models::{CatalogEntry, CatalogKind};

#[derive(Default)]
pub struct MemoryCatalogStore {
    entries: RwLock<Vec<CatalogEntry>>,
    unavailable: AtomicBool,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail as an unreachable database would
    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn add(&self, kind: CatalogKind, value: &str, parent: &str) -> Result<bool> {
        self.check()?;
        let mut entries = self.entries.write().unwrap();

        if entries
            .iter()
            .any(|e| e.kind == kind && e.value == value && e.parent == parent)
        {
            return Ok(false);
        }

        entries.push(CatalogEntry {
            kind,
            value: value.to_string(),
            parent: parent.to_string(),
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn list(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
        self.check()?;
        Ok(self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect())
    }
}
