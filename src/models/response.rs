use serde::Serialize;

/// Success payload returned to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeResponse {
    pub status_code: u16,
    pub body: String,
}

impl ResizeResponse {
    /// 200 response whose body is `message` encoded as a JSON string.
    pub fn ok(message: &str) -> Self {
        Self {
            status_code: 200,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }
}
