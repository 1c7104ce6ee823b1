//! S3-compatible [`FileStore`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::{Builder as S3ConfigBuilder, Credentials};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{validate_key, FileStore, StorageError};

/// Connection settings for [`S3Store::connect`].
///
/// `endpoint_url` points at a non-AWS S3-compatible service (MinIO,
/// Cloudflare R2); leave it `None` for AWS proper. When the static key
/// pair is absent the SDK's default provider chain is used.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint_url: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

/// Object storage on S3 or any S3-compatible endpoint.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build the SDK client and wrap it.
    pub async fn connect(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }
        if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
            loader = loader.credentials_provider(Credentials::new(
                access_key.clone(),
                secret_key.clone(),
                None,
                None,
                "static",
            ));
        }
        let base = loader.load().await;

        // Path-style addressing keeps MinIO-style endpoints working.
        let s3_config = S3ConfigBuilder::from(&base).force_path_style(true).build();

        tracing::debug!(
            bucket = %config.bucket,
            region = %config.region,
            custom_endpoint = config.endpoint_url.is_some(),
            "S3 client configured"
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
        }
    }
}

#[async_trait]
impl FileStore for S3Store {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let data = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
                Ok(data.into_bytes().to_vec())
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Err(StorageError::NotFound(key.to_string()))
                } else {
                    Err(StorageError::S3(service_err.to_string()))
                }
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        // S3 reports success for deletes of missing keys, matching the
        // FileStore contract.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
