use crate::services::storage::S3StorageService;
use aws_config::BehaviorVersion;
use std::env;
use std::sync::Arc;
use tracing::info;

/// Builds the process-wide S3 client. Credentials and region come from the
/// default provider chain; `S3_ENDPOINT` points at a local S3-compatible
/// store (MinIO, LocalStack) and switches to path-style addressing.
pub async fn setup_storage() -> Arc<S3StorageService> {
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);
    match env::var("S3_ENDPOINT") {
        Ok(endpoint_url) if !endpoint_url.is_empty() => {
            info!("☁️  S3 Storage: {} (path-style)", endpoint_url);
            s3_config = s3_config.endpoint_url(endpoint_url).force_path_style(true);
        }
        _ => {
            info!(
                "☁️  S3 Storage: AWS (region: {})",
                aws_config
                    .region()
                    .map(|r| r.as_ref().to_string())
                    .unwrap_or_else(|| "unset".to_string())
            );
        }
    }

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config.build());
    Arc::new(S3StorageService::new(s3_client))
}
