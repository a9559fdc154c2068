use std::sync::Arc;
use tracing::{error, info};

use crate::config::ResizeConfig;
use crate::error::Result;
use crate::models::{ResizeResponse, S3Event, SourceObject};
use crate::services::image_processor::ImageProcessor;
use crate::services::storage::StorageService;
use crate::utils::keys;

/// Turns one object-created notification into one resized JPEG in the
/// destination bucket.
pub struct ResizeService {
    storage: Arc<dyn StorageService>,
    processor: ImageProcessor,
    config: ResizeConfig,
}

impl ResizeService {
    pub fn new(storage: Arc<dyn StorageService>, config: ResizeConfig) -> Self {
        Self {
            storage,
            processor: ImageProcessor::from_config(&config),
            config,
        }
    }

    /// Entry point for raw runtime payloads.
    pub async fn handle_value(&self, payload: serde_json::Value) -> Result<ResizeResponse> {
        let event = S3Event::from_value(payload)?;
        self.handle(&event).await
    }

    pub async fn handle(&self, event: &S3Event) -> Result<ResizeResponse> {
        let mut source = event.source_object()?;
        if self.config.decode_object_keys {
            source = source.url_decoded()?;
        }

        match self.resize_object(&source).await {
            Ok(destination_key) => {
                Ok(ResizeResponse::ok(&keys::confirmation_message(&destination_key)))
            }
            Err(e) => {
                error!(
                    bucket = %source.bucket,
                    key = %source.key,
                    error_type = e.error_type(),
                    "Resize failed: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Fetch, process and store a single object. Returns the destination key.
    pub async fn resize_object(&self, source: &SourceObject) -> Result<String> {
        let (width, height) = self.processor.dimensions();
        info!(
            "Resizing s3://{}/{} to {}x{}",
            source.bucket, source.key, width, height
        );

        let data = self.storage.get_object(&source.bucket, &source.key).await?;
        tracing::debug!("Fetched {} bytes", data.len());

        let jpeg = self.processor.process(&data)?;

        let destination_key = keys::destination_key(&source.key);
        let size = jpeg.len();
        self.storage
            .put_object(
                &self.config.destination_bucket,
                &destination_key,
                jpeg,
                mime::IMAGE_JPEG.as_ref(),
            )
            .await?;

        info!(
            "Stored s3://{}/{} ({} bytes)",
            self.config.destination_bucket, destination_key, size
        );
        Ok(destination_key)
    }
}
