use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::Result;
use crate::features::contacts::models::{Attachment, Contact, NewAttachment, NewContact};

const CONTACT_COLUMNS: &str = "id, name, email, company, message, created_at";
const ATTACHMENT_COLUMNS: &str =
    "id, contact_id, file_name, original_name, mime_type, size, file_path, created_at";

/// Persistence for contact submissions and their attachments
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact>;

    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>>;

    /// All contacts, oldest first
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Delete a contact and (by cascade) its attachments. `false` if it did not exist.
    async fn delete_contact(&self, id: Uuid) -> Result<bool>;

    async fn create_attachment(&self, new_attachment: NewAttachment) -> Result<Attachment>;

    async fn list_attachments_by_contact(&self, contact_id: Uuid) -> Result<Vec<Attachment>>;

    async fn delete_attachment(&self, id: Uuid) -> Result<bool>;
}

/// PostgreSQL implementation of [`ContactRepository`]
pub struct PgContactRepository {
    pool: PgPool,
}

impl PgContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact> {
        let sql = format!(
            r#"
            INSERT INTO contacts (name, email, company, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CONTACT_COLUMNS
        );

        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(&new_contact.name)
            .bind(&new_contact.email)
            .bind(&new_contact.company)
            .bind(&new_contact.message)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create contact: {:?}", e);
                map_write_error(e, "Contact already exists")
            })?;
        Ok(contact)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
        let sql = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts ORDER BY created_at ASC",
            CONTACT_COLUMNS
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_attachment(&self, new_attachment: NewAttachment) -> Result<Attachment> {
        let sql = format!(
            r#"
            INSERT INTO attachments (contact_id, file_name, original_name, mime_type, size, file_path)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ATTACHMENT_COLUMNS
        );

        let attachment = sqlx::query_as::<_, Attachment>(&sql)
            .bind(new_attachment.contact_id)
            .bind(&new_attachment.file_name)
            .bind(&new_attachment.original_name)
            .bind(&new_attachment.mime_type)
            .bind(new_attachment.size)
            .bind(&new_attachment.file_path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create attachment: {:?}", e);
                map_write_error(e, "Attachment already exists")
            })?;
        Ok(attachment)
    }

    async fn list_attachments_by_contact(&self, contact_id: Uuid) -> Result<Vec<Attachment>> {
        let sql = format!(
            "SELECT {} FROM attachments WHERE contact_id = $1 ORDER BY created_at ASC",
            ATTACHMENT_COLUMNS
        );
        let attachments = sqlx::query_as::<_, Attachment>(&sql)
            .bind(contact_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(attachments)
    }

    async fn delete_attachment(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
