//! In-memory blob store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use super::{BlobStore, StoredBlob};
use crate::core::error::{AppError, Result};

#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, (Vec<u8>, String)>>,
    deny_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `put` calls fail as an access-denied store would
    pub fn deny_writes(&self) {
        self.deny_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .unwrap()
            .get(key)
            .map(|(_, content_type)| content_type.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<StoredBlob> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(AppError::PermissionDenied(format!(
                "Upload '{}' was denied: AccessDenied",
                path
            )));
        }

        self.objects
            .write()
            .unwrap()
            .insert(path.to_string(), (data, content_type.to_string()));

        Ok(StoredBlob {
            key: path.to_string(),
            url: self.resolve(path),
        })
    }

    fn resolve(&self, key: &str) -> String {
        format!("memory://blobs/{}", key)
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("Download '{}' failed", key)));
        }

        self.objects
            .read()
            .unwrap()
            .get(key)
            .map(|(data, _)| data.clone())
            .ok_or_else(|| AppError::Storage(format!("Object '{}' does not exist", key)))
    }
}
