use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::auth::guards::{ensure_admin, RequireAdmin};
use crate::features::auth::models::SessionContext;
use crate::features::case_studies::dtos::{
    CaseStudyEnvelopeDto, CaseStudyListDto, CreateCaseStudyDto, UpdateCaseStudyDto,
};
use crate::features::case_studies::services::CaseStudyService;
use crate::shared::types::{ApiResponse, Empty, ErrorResponse, PublishedQuery};

/// List case studies
///
/// `?published=false` includes drafts and requires an admin session.
#[utoipa::path(
    get,
    path = "/api/case-studies",
    tag = "case-studies",
    params(PublishedQuery),
    responses(
        (status = 200, description = "Case studies, newest first", body = ApiResponse<CaseStudyListDto>),
        (status = 401, description = "Authentication required for drafts", body = ErrorResponse),
        (status = 403, description = "Admin access required for drafts", body = ErrorResponse)
    )
)]
pub async fn list_case_studies(
    ctx: SessionContext,
    State(service): State<Arc<CaseStudyService>>,
    AppQuery(query): AppQuery<PublishedQuery>,
) -> Result<Json<ApiResponse<CaseStudyListDto>>> {
    if query.includes_drafts() {
        ensure_admin(ctx.user.as_ref())?;
    }

    let case_studies = service.list(query.includes_drafts()).await?;
    Ok(Json(ApiResponse::success(
        CaseStudyListDto { case_studies },
        None,
    )))
}

/// Get a case study by slug
#[utoipa::path(
    get,
    path = "/api/case-studies/{slug}",
    tag = "case-studies",
    params(
        ("slug" = String, Path, description = "Case study slug")
    ),
    responses(
        (status = 200, description = "Case study found", body = ApiResponse<CaseStudyEnvelopeDto>),
        (status = 404, description = "Case study not found", body = ErrorResponse)
    )
)]
pub async fn get_case_study(
    ctx: SessionContext,
    State(service): State<Arc<CaseStudyService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<CaseStudyEnvelopeDto>>> {
    let case_study = service.get_by_slug(&slug, ctx.is_admin()).await?;
    Ok(Json(ApiResponse::success(
        CaseStudyEnvelopeDto { case_study },
        None,
    )))
}

/// Create a case study
#[utoipa::path(
    post,
    path = "/api/case-studies",
    tag = "case-studies",
    request_body = CreateCaseStudyDto,
    responses(
        (status = 201, description = "Case study created", body = ApiResponse<CaseStudyEnvelopeDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn create_case_study(
    _admin: RequireAdmin,
    State(service): State<Arc<CaseStudyService>>,
    AppJson(dto): AppJson<CreateCaseStudyDto>,
) -> Result<(StatusCode, Json<ApiResponse<CaseStudyEnvelopeDto>>)> {
    dto.validate()?;

    let case_study = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            CaseStudyEnvelopeDto { case_study },
            None,
        )),
    ))
}

/// Update a case study
#[utoipa::path(
    put,
    path = "/api/case-studies/{id}",
    tag = "case-studies",
    params(
        ("id" = Uuid, Path, description = "Case study ID")
    ),
    request_body = UpdateCaseStudyDto,
    responses(
        (status = 200, description = "Case study updated", body = ApiResponse<CaseStudyEnvelopeDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Case study not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_case_study(
    _admin: RequireAdmin,
    State(service): State<Arc<CaseStudyService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateCaseStudyDto>,
) -> Result<Json<ApiResponse<CaseStudyEnvelopeDto>>> {
    dto.validate()?;

    let case_study = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        CaseStudyEnvelopeDto { case_study },
        None,
    )))
}

/// Delete a case study
#[utoipa::path(
    delete,
    path = "/api/case-studies/{id}",
    tag = "case-studies",
    params(
        ("id" = Uuid, Path, description = "Case study ID")
    ),
    responses(
        (status = 200, description = "Case study deleted", body = ApiResponse<Empty>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Case study not found", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn delete_case_study(
    _admin: RequireAdmin,
    State(service): State<Arc<CaseStudyService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Empty>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::<Empty>::ok(None)))
}
