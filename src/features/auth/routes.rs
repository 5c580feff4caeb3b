use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Auth routes. Every route reads the session resolved by the session middleware.
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/verify-2fa", post(handlers::verify_2fa))
        .route("/api/verify-email", post(handlers::verify_email))
        .route("/api/logout", post(handlers::logout))
        .route("/api/user", get(handlers::get_current_user))
        .with_state(service)
}
