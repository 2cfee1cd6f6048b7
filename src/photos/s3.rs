use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use aws_types::region::Region;

use crate::errors::DirectoryError;

use super::{generate_stored_name, PhotoStore};

fn photo_error(context: &str, err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::PhotoStoreUnavailable(format!("{}: {}", context, err))
}

/// Photo store over an S3 bucket, for deployments without a shared local
/// filesystem. Stored names double as object keys.
pub struct S3PhotoStore {
    client: S3Client,
    bucket: String,
}

impl S3PhotoStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        S3PhotoStore {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds the client from the ambient AWS environment, with the bucket
    /// taken from `AWS_S3_BUCKET`.
    pub async fn from_env() -> Result<Self, DirectoryError> {
        let bucket = std::env::var("AWS_S3_BUCKET")
            .map_err(|_| photo_error("reading AWS_S3_BUCKET", "variable not set"))?;
        let aws_config = ConfigLoader::default()
            .region(std::env::var("AWS_REGION").ok().map(Region::new))
            .behavior_version(BehaviorVersion::latest())
            .load()
            .await;
        Ok(S3PhotoStore::new(S3Client::new(&aws_config), bucket))
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn save(&self, filename_hint: &str, bytes: &[u8]) -> Result<String, DirectoryError> {
        let stored_name = generate_stored_name(filename_hint);
        // put_object is atomic on the S3 side: the key either appears with
        // the full body or not at all.
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&stored_name)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| photo_error("uploading photo", e.into_service_error()))?;
        Ok(stored_name)
    }

    async fn delete(&self, stored_name: &str) -> Result<(), DirectoryError> {
        // S3 DeleteObject succeeds for absent keys, which matches the
        // idempotent delete contract.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(stored_name)
            .send()
            .await
            .map_err(|e| photo_error("deleting photo", e.into_service_error()))?;
        Ok(())
    }

    async fn open(&self, stored_name: &str) -> Result<Option<Vec<u8>>, DirectoryError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(stored_name)
            .send()
            .await;
        match output {
            Ok(object) => {
                let data = object
                    .body
                    .collect()
                    .await
                    .map_err(|e| photo_error("reading photo body", e))?;
                Ok(Some(data.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(photo_error("reading photo", service_err))
                }
            }
        }
    }
}
