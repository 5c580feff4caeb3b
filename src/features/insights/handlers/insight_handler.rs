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
use crate::features::insights::dtos::{
    CreateInsightDto, InsightEnvelopeDto, InsightListDto, UpdateInsightDto,
};
use crate::features::insights::services::InsightService;
use crate::shared::types::{ApiResponse, Empty, ErrorResponse, PublishedQuery};

/// List insights
///
/// Published insights are public. `?published=false` includes drafts and
/// requires an admin session.
#[utoipa::path(
    get,
    path = "/api/insights",
    tag = "insights",
    params(PublishedQuery),
    responses(
        (status = 200, description = "Insights, newest first", body = ApiResponse<InsightListDto>),
        (status = 401, description = "Authentication required for drafts", body = ErrorResponse),
        (status = 403, description = "Admin access required for drafts", body = ErrorResponse)
    )
)]
pub async fn list_insights(
    ctx: SessionContext,
    State(service): State<Arc<InsightService>>,
    AppQuery(query): AppQuery<PublishedQuery>,
) -> Result<Json<ApiResponse<InsightListDto>>> {
    if query.includes_drafts() {
        ensure_admin(ctx.user.as_ref())?;
    }

    let insights = service.list(query.includes_drafts()).await?;
    Ok(Json(ApiResponse::success(InsightListDto { insights }, None)))
}

/// Get an insight by slug
#[utoipa::path(
    get,
    path = "/api/insights/{slug}",
    tag = "insights",
    params(
        ("slug" = String, Path, description = "Insight slug")
    ),
    responses(
        (status = 200, description = "Insight found", body = ApiResponse<InsightEnvelopeDto>),
        (status = 404, description = "Insight not found", body = ErrorResponse)
    )
)]
pub async fn get_insight(
    ctx: SessionContext,
    State(service): State<Arc<InsightService>>,
    AppPath(slug): AppPath<String>,
) -> Result<Json<ApiResponse<InsightEnvelopeDto>>> {
    let insight = service.get_by_slug(&slug, ctx.is_admin()).await?;
    Ok(Json(ApiResponse::success(InsightEnvelopeDto { insight }, None)))
}

/// Create an insight
#[utoipa::path(
    post,
    path = "/api/insights",
    tag = "insights",
    request_body = CreateInsightDto,
    responses(
        (status = 201, description = "Insight created", body = ApiResponse<InsightEnvelopeDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn create_insight(
    _admin: RequireAdmin,
    State(service): State<Arc<InsightService>>,
    AppJson(dto): AppJson<CreateInsightDto>,
) -> Result<(StatusCode, Json<ApiResponse<InsightEnvelopeDto>>)> {
    dto.validate()?;

    let insight = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(InsightEnvelopeDto { insight }, None)),
    ))
}

/// Update an insight
///
/// Absent fields keep their current value.
#[utoipa::path(
    put,
    path = "/api/insights/{id}",
    tag = "insights",
    params(
        ("id" = Uuid, Path, description = "Insight ID")
    ),
    request_body = UpdateInsightDto,
    responses(
        (status = 200, description = "Insight updated", body = ApiResponse<InsightEnvelopeDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Insight not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_insight(
    _admin: RequireAdmin,
    State(service): State<Arc<InsightService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateInsightDto>,
) -> Result<Json<ApiResponse<InsightEnvelopeDto>>> {
    dto.validate()?;

    let insight = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(InsightEnvelopeDto { insight }, None)))
}

/// Delete an insight
#[utoipa::path(
    delete,
    path = "/api/insights/{id}",
    tag = "insights",
    params(
        ("id" = Uuid, Path, description = "Insight ID")
    ),
    responses(
        (status = 200, description = "Insight deleted", body = ApiResponse<Empty>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Insight not found", body = ErrorResponse)
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn delete_insight(
    _admin: RequireAdmin,
    State(service): State<Arc<InsightService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<Empty>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::<Empty>::ok(None)))
}
