use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Text fields of the contact form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    #[validate(length(min = 1, max = 255, message = "Name is required (max 255 characters)"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(max = 255, message = "Company must not exceed 255 characters"))]
    pub company: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

impl CreateContactDto {
    /// An empty company field means no company
    pub fn normalized(mut self) -> Self {
        self.company = self
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }
}

/// Contact form request for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ContactFormDto {
    #[schema(example = "Bob")]
    pub name: String,
    #[schema(example = "bob@example.com")]
    pub email: String,
    pub company: Option<String>,
    #[schema(example = "I'd like to talk about a project.")]
    pub message: String,
    /// Up to 5 files, 10MB each (images, PDF, Word, Excel, plain text, CSV)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub attachments: Option<Vec<String>>,
}

/// Response DTO for a contact submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponseDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for a stored attachment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponseDto {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

/// A contact together with its attachments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactDetailDto {
    pub contact: ContactResponseDto,
    pub attachments: Vec<AttachmentResponseDto>,
}

/// Admin listing payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactListDto {
    pub contacts: Vec<ContactResponseDto>,
}
