use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body returned for every failed review request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorPayload {
    pub message: String,
    /// Mirrors the response status
    pub code: u16,
    /// Stable identifier such as `VALIDATION_ERROR` or `NOT_FOUND`
    pub r#type: String,
    /// For validation failures, `{"field": <name>}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
