mod response;
mod s3_event;

pub use response::ResizeResponse;
pub use s3_event::{S3Bucket, S3Entity, S3Event, S3EventRecord, S3Object, SourceObject};
