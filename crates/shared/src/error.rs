use serde::{Deserialize, Serialize};

/// Error body some store deployments attach to non-2xx responses.
///
/// Both `{"message": ...}` and `{"error": ...}` shapes are seen in the wild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Best-effort extraction of a human readable reason from a raw response body.
    pub fn reason_from_body(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }
}
