//! Authorization guards for the admin console.
//!
//! The session middleware puts the signed-in user into request extensions;
//! these extractors verify it is present and carries the required rights.

use crate::core::error::AppError;
use crate::features::auth::models::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only operations.
///
/// Rejects anonymous callers with 401 and signed-in non-admins with 403.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

/// Check that the caller is a signed-in administrator
pub fn ensure_admin(user: Option<&AuthenticatedUser>) -> Result<&AuthenticatedUser, AppError> {
    let user =
        user.ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !user.is_admin {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(user)
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = ensure_admin(parts.extensions.get::<AuthenticatedUser>())?;
        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use uuid::Uuid;

    fn user(is_admin: bool) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            is_admin,
            email_verified: true,
        }
    }

    async fn guard(user: Option<AuthenticatedUser>) -> Result<RequireAdmin, AppError> {
        let (mut parts, _) = Request::new(()).into_parts();
        if let Some(user) = user {
            parts.extensions.insert(user);
        }
        RequireAdmin::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let err = guard(None).await.err().unwrap();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let err = guard(Some(user(false))).await.err().unwrap();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes() {
        let RequireAdmin(admin) = guard(Some(user(true))).await.ok().unwrap();
        assert_eq!(admin.username, "alice");
    }

    #[test]
    fn test_ensure_admin() {
        assert!(ensure_admin(None).is_err());
        assert!(ensure_admin(Some(&user(false))).is_err());
        assert!(ensure_admin(Some(&user(true))).is_ok());
    }
}
