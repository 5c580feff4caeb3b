use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, RegisterRequestDto, UserResponseDto, VerifyCodeRequestDto,
};
use crate::features::auth::models::{AuthenticatedUser, SessionContext};
use crate::features::auth::services::AuthService;
use crate::features::auth::session_cookie;
use crate::shared::types::{ApiResponse, Empty, ErrorResponse};

/// Append a `Set-Cookie` header to a response
fn with_cookie(response: impl IntoResponse, cookie: String) -> Result<Response> {
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;
    let mut response = response.into_response();
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

/// Register the site administrator
///
/// Only allowed while no user exists. The new administrator is signed in
/// immediately and a code to confirm the email address is sent.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Administrator registered and signed in", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Registration is closed", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    ctx: SessionContext,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<Response> {
    dto.validate()?;

    let (user, token) = service.register(&ctx, dto).await?;
    with_cookie(
        (
            StatusCode::CREATED,
            Json(ApiResponse::success(user, None)),
        ),
        session_cookie::build_cookie(service.session_config(), &token),
    )
}

/// Login step one: check credentials and email a verification code
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Verification code sent", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 502, description = "Verification email could not be sent", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    ctx: SessionContext,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Response> {
    dto.validate()?;

    let (body, new_token) = service.login(&ctx, dto).await?;
    let response = Json(ApiResponse::success(
        body,
        Some("2FA code sent to your email".to_string()),
    ));

    match new_token {
        Some(token) => with_cookie(
            response,
            session_cookie::build_cookie(service.session_config(), &token),
        ),
        None => Ok(response.into_response()),
    }
}

/// Login step two: submit the emailed code to complete the login
#[utoipa::path(
    post,
    path = "/api/verify-2fa",
    request_body = VerifyCodeRequestDto,
    responses(
        (status = 200, description = "Login completed", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Invalid or expired code, or no pending login", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn verify_2fa(
    State(service): State<Arc<AuthService>>,
    ctx: SessionContext,
    AppJson(dto): AppJson<VerifyCodeRequestDto>,
) -> Result<Response> {
    dto.validate()?;

    let (user, token) = service.verify_login(&ctx, dto).await?;
    with_cookie(
        Json(ApiResponse::success(user, None)),
        session_cookie::build_cookie(service.session_config(), &token),
    )
}

/// Confirm the administrator's email address
#[utoipa::path(
    post,
    path = "/api/verify-email",
    request_body = VerifyCodeRequestDto,
    responses(
        (status = 200, description = "Email address confirmed", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Invalid or expired code", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn verify_email(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<VerifyCodeRequestDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()?;

    let user = service.verify_email(&user, dto).await?;
    Ok(Json(ApiResponse::success(user, None)))
}

/// Sign out and clear the session cookie
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<Empty>)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    ctx: SessionContext,
) -> Result<Response> {
    service.logout(&ctx).await;

    with_cookie(
        Json(ApiResponse::<Empty>::ok(Some("Logged out successfully".to_string()))),
        session_cookie::clear_cookie(service.session_config()),
    )
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_current_user(user: AuthenticatedUser) -> Json<ApiResponse<UserResponseDto>> {
    Json(ApiResponse::success(user.into(), None))
}
