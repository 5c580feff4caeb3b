use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppMultipart, AppPath};
use crate::features::auth::guards::RequireAdmin;
use crate::features::contacts::dtos::{
    ContactDetailDto, ContactFormDto, ContactListDto, CreateContactDto,
};
use crate::features::contacts::services::ContactService;
use crate::modules::storage::{is_mime_type_allowed, StagedFile};
use crate::shared::types::{ApiResponse, Empty, ErrorResponse};

const ATTACHMENTS_FIELD: &str = "attachments";

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart field: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Request body too large: {}", e.body_text()))
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

/// Read the form, streaming every attachment to disk as it arrives.
/// Files staged before a failure are left in `staged` for the caller to remove.
async fn read_form(
    service: &ContactService,
    multipart: &mut Multipart,
    staged: &mut Vec<StagedFile>,
) -> Result<CreateContactDto> {
    let mut dto = CreateContactDto::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        if let Some(file_name) = field.file_name().map(|s| s.to_string()) {
            if field_name != ATTACHMENTS_FIELD {
                return Err(AppError::FileUpload(
                    "Unexpected file field. Please use the attachments field.".to_string(),
                ));
            }

            if staged.len() >= service.max_files() {
                return Err(AppError::FileUpload(format!(
                    "Too many files. Maximum {} files allowed.",
                    service.max_files()
                )));
            }

            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            if !is_mime_type_allowed(&content_type) {
                return Err(AppError::FileUpload(format!(
                    "File type {} is not allowed",
                    content_type
                )));
            }

            let file = service
                .storage()
                .stage(&file_name, &content_type, field.map_err(multipart_error))
                .await?;
            staged.push(file);
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match field_name.as_str() {
            "name" => dto.name = value,
            "email" => dto.email = value,
            "company" => dto.company = Some(value),
            "message" => dto.message = value,
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok(dto)
}

/// Submit the contact form
///
/// Accepts multipart/form-data with `name`, `email`, optional `company`,
/// `message` and up to five `attachments`.
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "contacts",
    request_body(
        content = ContactFormDto,
        content_type = "multipart/form-data",
        description = "Contact form with optional file attachments",
    ),
    responses(
        (status = 201, description = "Contact stored", body = ApiResponse<ContactDetailDto>),
        (status = 400, description = "Validation or upload error", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse)
    )
)]
pub async fn create_contact(
    State(service): State<Arc<ContactService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<(StatusCode, Json<ApiResponse<ContactDetailDto>>)> {
    let mut staged = Vec::new();
    let dto = match read_form(&service, &mut multipart, &mut staged).await {
        Ok(dto) => dto,
        Err(e) => {
            service.discard(&staged).await;
            return Err(e);
        }
    };

    let detail = service.submit(dto, staged).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            detail,
            Some("Thank you for your message. We will get back to you soon.".to_string()),
        )),
    ))
}

/// List all contact submissions
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "Contacts, oldest first", body = ApiResponse<ContactListDto>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn list_contacts(
    _admin: RequireAdmin,
    State(service): State<Arc<ContactService>>,
) -> Result<Json<ApiResponse<ContactListDto>>> {
    let contacts = service.list().await?;
    Ok(Json(ApiResponse::success(contacts, None)))
}

/// Get a contact submission with its attachments
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "contacts",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact found", body = ApiResponse<ContactDetailDto>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_contact(
    _admin: RequireAdmin,
    State(service): State<Arc<ContactService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<ContactDetailDto>>> {
    let contact = service.get(id).await?;
    Ok(Json(ApiResponse::success(contact, None)))
}

/// Delete a contact submission and its stored files
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "contacts",
    params(
        ("id" = Uuid, Path, description = "Contact ID")
    ),
    responses(
        (status = 200, description = "Contact deleted", body = ApiResponse<Empty>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn delete_contact(
    _admin: RequireAdmin,
    State(service): State<Arc<ContactService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Empty>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::<Empty>::ok(Some(
        "Contact deleted successfully".to_string(),
    ))))
}
