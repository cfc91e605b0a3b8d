//! Blob storage for uploaded resource files.
//!
//! `BlobStore` is the seam the resource lifecycle talks to; `MinIOClient` is the
//! production implementation and `MemoryBlobStore` backs the tests.

#[cfg(test)]
mod memory;
mod minio_client;
mod sigv4;

use async_trait::async_trait;

use crate::core::error::Result;

#[cfg(test)]
pub use memory::MemoryBlobStore;
pub use minio_client::MinIOClient;

/// Handle to a stored object plus the URL it can be retrieved from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` under `path` and returns its handle
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<StoredBlob>;

    /// Retrievable URL for a handle returned by `put`
    fn resolve(&self, key: &str) -> String;

    async fn fetch(&self, key: &str) -> Result<Vec<u8>>;
}
