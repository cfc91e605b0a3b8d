//! MinIO/S3-compatible blob store
//!
//! Objects are written under the configured public prefix so their URLs are
//! directly retrievable. Uses rust-s3 for object operations.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use tracing::{debug, info, warn};

use super::sigv4::SigV4;
use super::{BlobStore, StoredBlob};
use crate::core::config::MinIOConfig;
use crate::core::error::{AppError, Result};

pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    public_prefix: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    http_client: Client,
}

/// Maps an S3 failure to `PermissionDenied` when the store refused access,
/// otherwise to a storage error.
fn classify_s3_failure(operation: &str, key: &str, status: Option<u16>, detail: &str) -> AppError {
    if status == Some(403) || detail.contains("AccessDenied") || detail.contains("403") {
        return AppError::PermissionDenied(format!("{} '{}' was denied: {}", operation, key, detail));
    }
    AppError::Storage(format!("{} '{}' failed: {}", operation, key, detail))
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl MinIOClient {
    /// Connects to MinIO, creating the bucket and its public-read policy if needed
    pub async fn new(config: MinIOConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // MinIO expects http://endpoint/bucket rather than virtual-host style
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let client = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            public_endpoint: config.public_endpoint.trim_end_matches('/').to_string(),
            public_prefix: config.public_prefix.trim_matches('/').to_string(),
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        client.ensure_bucket_exists().await;
        client.ensure_public_read_policy().await;

        info!(
            "MinIO blob store ready: endpoint={}, bucket={}, prefix={}",
            client.endpoint,
            client.bucket.name(),
            client.public_prefix
        );

        Ok(client)
    }

    async fn ensure_bucket_exists(&self) {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => info!("Bucket '{}' created", self.bucket.name()),
            Err(e) => {
                let message = e.to_string();
                if message.contains("BucketAlreadyOwnedByYou")
                    || message.contains("BucketAlreadyExists")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
            }
        }
    }

    /// Grants anonymous GetObject on `{prefix}/*`. Failure is logged, not fatal.
    async fn ensure_public_read_policy(&self) {
        let bucket_name = self.bucket.name();
        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Principal": {"AWS": "*"},
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{}/{}/*", bucket_name, self.public_prefix)]
            }]
        })
        .to_string();

        match self.put_bucket_policy(&bucket_name, &policy).await {
            Ok(()) => info!(
                "Public read policy set for {}/{}/*",
                bucket_name, self.public_prefix
            ),
            Err(e) => warn!(
                "Failed to set bucket policy for '{}': {}. Set it manually with: mc anonymous set download minio/{}/{}",
                bucket_name, e, bucket_name, self.public_prefix
            ),
        }
    }

    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<()> {
        let endpoint_url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
        let host = endpoint_url
            .host_str()
            .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
        let host_header = match endpoint_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let signer = SigV4 {
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.region_name,
            service: "s3",
        };
        let signed = signer
            .sign(
                "PUT",
                &host_header,
                &format!("/{}", bucket_name),
                "policy=",
                policy.as_bytes(),
                Utc::now(),
            )
            .map_err(|e| AppError::Internal(format!("Failed to sign policy request: {}", e)))?;

        let response = self
            .http_client
            .put(format!("{}/{}?policy", self.endpoint, bucket_name))
            .header("Host", &host_header)
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.payload_hash)
            .header("Authorization", &signed.authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to send policy request: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_s3_failure(
            "Bucket policy update",
            bucket_name,
            Some(status.as_u16()),
            &body,
        ))
    }

    fn object_key(&self, path: &str) -> String {
        format!("{}/{}", self.public_prefix, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl BlobStore for MinIOClient {
    async fn put(&self, path: &str, data: Vec<u8>, content_type: &str) -> Result<StoredBlob> {
        let key = self.object_key(path);

        let response = self
            .bucket
            .put_object_with_content_type(&key, &data, content_type)
            .await
            .map_err(|e| classify_s3_failure("Upload", &key, None, &e.to_string()))?;

        let status = response.status_code();
        if !is_success(status) {
            let body = String::from_utf8_lossy(response.as_slice()).into_owned();
            return Err(classify_s3_failure("Upload", &key, Some(status), &body));
        }

        debug!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            key,
            data.len(),
            self.bucket.name()
        );

        let url = self.resolve(&key);
        Ok(StoredBlob { key, url })
    }

    fn resolve(&self, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/{}/{}",
            self.public_endpoint,
            self.bucket.name(),
            encoded_key
        )
    }

    async fn fetch(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(|e| classify_s3_failure("Download", key, None, &e.to_string()))?;

        let status = response.status_code();
        if !is_success(status) {
            let body = String::from_utf8_lossy(response.as_slice()).into_owned();
            return Err(classify_s3_failure("Download", key, Some(status), &body));
        }

        debug!("Downloaded '{}' from bucket '{}'", key, self.bucket.name());
        Ok(response.to_vec())
    }
}
