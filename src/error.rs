use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use lambda_runtime::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResizeError>;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Object not found: s3://{bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Transient storage error: {0}")]
    TransientStorage(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl ResizeError {
    /// Name reported to the runtime as the invocation's `errorType`.
    pub fn error_type(&self) -> &'static str {
        match self {
            ResizeError::MalformedEvent(_) => "MalformedEventError",
            ResizeError::ObjectNotFound { .. } => "ObjectNotFoundError",
            ResizeError::AccessDenied(_) => "AccessDeniedError",
            ResizeError::TransientStorage(_) => "TransientStorageError",
            ResizeError::UnsupportedFormat(_) => "UnsupportedFormatError",
            ResizeError::Encoding(_) => "EncodingError",
        }
    }

    /// Maps an S3 SDK failure for `bucket/key` onto the storage variants.
    ///
    /// Only service errors carry a code; dispatch, timeout and response
    /// failures are always treated as transient. A missing bucket or key is
    /// only `ObjectNotFound` when fetching: on store the destination is a
    /// deployment constant, so its absence is a service fault.
    pub fn from_sdk<E, R>(
        err: SdkError<E, R>,
        operation: StorageOperation,
        bucket: &str,
        key: &str,
    ) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        let code = err
            .as_service_error()
            .and_then(|service_error| service_error.code())
            .map(str::to_owned);

        match (code.as_deref(), operation) {
            (Some("NoSuchKey" | "NoSuchBucket" | "NotFound"), StorageOperation::Fetch) => {
                ResizeError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                }
            }
            (
                Some("AccessDenied" | "Forbidden" | "InvalidAccessKeyId" | "SignatureDoesNotMatch"),
                _,
            ) => ResizeError::AccessDenied(format!("s3://{}/{}", bucket, key)),
            _ => ResizeError::TransientStorage(format!(
                "s3://{}/{}: {}",
                bucket,
                key,
                aws_sdk_s3::error::DisplayErrorContext(&err)
            )),
        }
    }
}

/// Which storage call an SDK error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Fetch,
    Store,
}

impl From<ResizeError> for Diagnostic {
    fn from(error: ResizeError) -> Diagnostic {
        Diagnostic {
            error_type: error.error_type().to_string(),
            error_message: error.to_string(),
        }
    }
}
