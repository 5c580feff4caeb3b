//! In-memory contact repository with failure injection for compensation tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::ContactRepository;
use crate::core::error::{AppError, Result};
use crate::features::contacts::models::{Attachment, Contact, NewAttachment, NewContact};

#[derive(Default)]
struct State {
    contacts: Vec<Contact>,
    attachments: Vec<Attachment>,
    /// Attachment inserts allowed before every further insert fails
    attachment_budget: Option<usize>,
}

#[derive(Default)]
pub struct InMemoryContactRepository {
    state: Mutex<State>,
}

impl InMemoryContactRepository {
    /// Let `n` attachment inserts succeed, then fail the rest
    pub fn fail_attachments_after(&self, n: usize) {
        self.state.lock().unwrap().attachment_budget = Some(n);
    }

    pub fn contact_count(&self) -> usize {
        self.state.lock().unwrap().contacts.len()
    }

    pub fn attachment_count(&self) -> usize {
        self.state.lock().unwrap().attachments.len()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact> {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: new_contact.name,
            email: new_contact.email,
            company: new_contact.company,
            message: new_contact.message,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().contacts.push(contact.clone());
        Ok(contact)
    }

    async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .contacts
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let mut contacts = self.state.lock().unwrap().contacts.clone();
        contacts.sort_by_key(|c| c.created_at);
        Ok(contacts)
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.contacts.len();
        state.contacts.retain(|c| c.id != id);
        state.attachments.retain(|a| a.contact_id != id);
        Ok(state.contacts.len() < before)
    }

    async fn create_attachment(&self, new_attachment: NewAttachment) -> Result<Attachment> {
        let mut state = self.state.lock().unwrap();

        if !state.contacts.iter().any(|c| c.id == new_attachment.contact_id) {
            return Err(AppError::BadRequest(
                "Referenced record does not exist.".to_string(),
            ));
        }

        if let Some(budget) = state.attachment_budget.as_mut() {
            if *budget == 0 {
                return Err(AppError::Internal("injected attachment failure".to_string()));
            }
            *budget -= 1;
        }

        let attachment = Attachment {
            id: Uuid::new_v4(),
            contact_id: new_attachment.contact_id,
            file_name: new_attachment.file_name,
            original_name: new_attachment.original_name,
            mime_type: new_attachment.mime_type,
            size: new_attachment.size,
            file_path: new_attachment.file_path,
            created_at: Utc::now(),
        };
        state.attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn list_attachments_by_contact(&self, contact_id: Uuid) -> Result<Vec<Attachment>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attachments
            .iter()
            .filter(|a| a.contact_id == contact_id)
            .cloned()
            .collect())
    }

    async fn delete_attachment(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.attachments.len();
        state.attachments.retain(|a| a.id != id);
        Ok(state.attachments.len() < before)
    }
}
