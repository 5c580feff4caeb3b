use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactDetailDto, ContactListDto, CreateContactDto};
use crate::features::contacts::models::{Attachment, Contact, NewAttachment, NewContact};
use crate::features::contacts::repositories::ContactRepository;
use crate::modules::email::{ContactNotification, EmailService, NotificationAttachment};
use crate::modules::storage::{LocalDiskStorage, StagedFile};

pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    storage: Arc<LocalDiskStorage>,
    email: Arc<EmailService>,
    max_files: usize,
}

impl ContactService {
    pub fn new(
        repo: Arc<dyn ContactRepository>,
        storage: Arc<LocalDiskStorage>,
        email: Arc<EmailService>,
        max_files: usize,
    ) -> Self {
        Self {
            repo,
            storage,
            email,
            max_files,
        }
    }

    pub fn storage(&self) -> &LocalDiskStorage {
        &self.storage
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Delete files staged for a request that will not reach `submit`
    pub async fn discard(&self, staged: &[StagedFile]) {
        self.storage.remove_all(staged).await;
    }

    /// Store a contact submission with its staged files and notify the owner.
    ///
    /// Either the contact and every attachment are stored, or nothing is: a
    /// failure removes the rows created so far and the staged files.
    pub async fn submit(
        &self,
        dto: CreateContactDto,
        staged: Vec<StagedFile>,
    ) -> Result<ContactDetailDto> {
        let dto = dto.normalized();
        if let Err(errors) = dto.validate() {
            self.discard(&staged).await;
            return Err(errors.into());
        }

        let contact = match self
            .repo
            .create_contact(NewContact {
                name: dto.name,
                email: dto.email,
                company: dto.company,
                message: dto.message,
            })
            .await
        {
            Ok(contact) => contact,
            Err(e) => {
                self.discard(&staged).await;
                return Err(e);
            }
        };

        let mut attachments: Vec<Attachment> = Vec::with_capacity(staged.len());
        for file in &staged {
            match self
                .repo
                .create_attachment(NewAttachment::from_staged(contact.id, file))
                .await
            {
                Ok(attachment) => attachments.push(attachment),
                Err(e) => {
                    self.compensate(&contact, &attachments).await;
                    self.discard(&staged).await;
                    return Err(e);
                }
            }
        }

        info!(
            "Stored contact {} with {} attachment(s)",
            contact.id,
            attachments.len()
        );

        self.notify(&contact, &attachments).await;

        Ok(ContactDetailDto {
            contact: contact.into(),
            attachments: attachments.into_iter().map(Into::into).collect(),
        })
    }

    /// Undo a partially stored submission; failures are logged only
    async fn compensate(&self, contact: &Contact, attachments: &[Attachment]) {
        for attachment in attachments {
            if let Err(e) = self.repo.delete_attachment(attachment.id).await {
                warn!(
                    "Failed to roll back attachment {} of contact {}: {}",
                    attachment.id, contact.id, e
                );
            }
        }

        if let Err(e) = self.repo.delete_contact(contact.id).await {
            warn!("Failed to roll back contact {}: {}", contact.id, e);
        }
    }

    async fn notify(&self, contact: &Contact, attachments: &[Attachment]) {
        let notification = ContactNotification {
            name: contact.name.clone(),
            email: contact.email.clone(),
            company: contact.company.clone(),
            message: contact.message.clone(),
            attachments: attachments
                .iter()
                .map(|a| NotificationAttachment {
                    name: a.original_name.clone(),
                    size: a.size,
                })
                .collect(),
        };

        if let Err(e) = self.email.send_contact_notification(&notification).await {
            warn!(
                "Failed to send notification for contact {}: {}",
                contact.id, e
            );
        }
    }

    pub async fn list(&self) -> Result<ContactListDto> {
        let contacts = self.repo.list_contacts().await?;
        Ok(ContactListDto {
            contacts: contacts.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<ContactDetailDto> {
        let contact = self
            .repo
            .get_contact(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contact with id {} not found", id)))?;
        let attachments = self.repo.list_attachments_by_contact(id).await?;

        Ok(ContactDetailDto {
            contact: contact.into(),
            attachments: attachments.into_iter().map(Into::into).collect(),
        })
    }

    /// Delete a contact, its attachment rows and their files
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let attachments = self.repo.list_attachments_by_contact(id).await?;

        if !self.repo.delete_contact(id).await? {
            return Err(AppError::NotFound(format!(
                "Contact with id {} not found",
                id
            )));
        }

        for attachment in &attachments {
            self.storage.remove(&attachment.file_path).await;
        }

        info!("Deleted contact {} ({} file(s))", id, attachments.len());
        Ok(())
    }
}
