use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::contacts::dtos::AttachmentResponseDto;
use crate::modules::storage::StagedFile;

/// Database model for a file attached to a contact submission
#[derive(Debug, Clone, FromRow)]
pub struct Attachment {
    pub id: Uuid,
    pub contact_id: Uuid,
    /// Generated name on disk
    pub file_name: String,
    /// Name as uploaded by the visitor
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub contact_id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub file_path: String,
}

impl NewAttachment {
    pub fn from_staged(contact_id: Uuid, file: &StagedFile) -> Self {
        Self {
            contact_id,
            file_name: file.file_name.clone(),
            original_name: file.original_name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size,
            file_path: file.path.clone(),
        }
    }
}

impl From<Attachment> for AttachmentResponseDto {
    fn from(a: Attachment) -> Self {
        Self {
            id: a.id,
            contact_id: a.contact_id,
            file_name: a.file_name,
            original_name: a.original_name,
            mime_type: a.mime_type,
            size: a.size,
            file_path: a.file_path,
            created_at: a.created_at,
        }
    }
}
