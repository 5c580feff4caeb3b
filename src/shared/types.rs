use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Success envelope. The payload's fields are flattened next to `success`,
/// e.g. `{"success": true, "contact": {...}, "attachments": [...]}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
        }
    }
}

/// Empty payload for endpoints that only report success
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

impl ApiResponse<Empty> {
    pub fn ok(message: Option<String>) -> Self {
        Self::success(Empty {}, message)
    }
}

/// Failure envelope returned by every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    /// Human-readable error message
    pub error: String,
    /// Field-level errors (validation failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: String, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            error,
            errors,
        }
    }
}

/// A single invalid input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// `?published=` filter shared by the insight and case study listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PublishedQuery {
    /// `false` includes drafts (admin only). Any other value, or none, lists
    /// published entries only.
    pub published: Option<String>,
}

impl PublishedQuery {
    /// Whether the caller asked for drafts as well as published entries
    pub fn includes_drafts(&self) -> bool {
        self.published.as_deref() == Some("false")
    }
}
