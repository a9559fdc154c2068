use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::error::{ResizeError, Result};

/// S3 notification payload. Records stay as raw JSON until one is read, so
/// records the handler never looks at cannot fail the invocation.
#[derive(Debug, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<serde_json::Value>,
}

/// Only the fields the handler reads are modelled; everything else in a
/// record is ignored.
#[derive(Debug, Deserialize)]
pub struct S3EventRecord {
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: Option<S3Bucket>,
    pub object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct S3Object {
    pub key: Option<String>,
}

/// The object a single invocation resizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
}

impl S3Event {
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ResizeError::MalformedEvent(format!("not an S3 notification: {}", e)))
    }

    /// Extracts bucket and key from `Records[0]`. Later records are ignored.
    pub fn source_object(&self) -> Result<SourceObject> {
        let raw = self
            .records
            .first()
            .ok_or_else(|| ResizeError::MalformedEvent("event has no records".to_string()))?;
        let record = S3EventRecord::deserialize(raw)
            .map_err(|e| ResizeError::MalformedEvent(format!("Records[0] is invalid: {}", e)))?;
        let entity = record
            .s3
            .as_ref()
            .ok_or_else(|| ResizeError::MalformedEvent("Records[0].s3 is missing".to_string()))?;

        let bucket = entity
            .bucket
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                ResizeError::MalformedEvent("Records[0].s3.bucket.name is missing".to_string())
            })?;
        let key = entity
            .object
            .as_ref()
            .and_then(|o| o.key.as_deref())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ResizeError::MalformedEvent("Records[0].s3.object.key is missing".to_string())
            })?;

        Ok(SourceObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl SourceObject {
    /// Notification keys are form-encoded: `+` stands for a space.
    pub fn url_decoded(self) -> Result<Self> {
        let plus_replaced = self.key.replace('+', " ");
        let key = percent_decode_str(&plus_replaced)
            .decode_utf8()
            .map_err(|e| {
                ResizeError::MalformedEvent(format!("object key is not valid UTF-8: {}", e))
            })?
            .into_owned();
        Ok(Self { key, ..self })
    }
}
