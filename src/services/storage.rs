use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{ResizeError, Result, StorageOperation};

/// Object storage the handler reads from and writes to.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Full contents of `bucket/key`.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Writes `data` to `bucket/key`, replacing any existing object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
}

pub struct S3StorageService {
    client: Client,
}

impl S3StorageService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let res = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ResizeError::from_sdk(e, StorageOperation::Fetch, bucket, key))?;

        let data = res.body.collect().await.map_err(|e| {
            ResizeError::TransientStorage(format!(
                "failed reading body of s3://{}/{}: {}",
                bucket, key, e
            ))
        })?;
        Ok(data.to_vec())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let res = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await;

        if let Err(e) = res {
            tracing::error!(
                "S3 put_object failed: dest={}/{}, error={:?}",
                bucket,
                key,
                e
            );
            return Err(ResizeError::from_sdk(
                e,
                StorageOperation::Store,
                bucket,
                key,
            ));
        }
        Ok(())
    }
}
