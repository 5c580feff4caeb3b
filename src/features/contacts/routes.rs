use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::contacts::handlers::{
    create_contact, delete_contact, get_contact, list_contacts,
};
use crate::features::contacts::services::ContactService;

/// Create routes for the contacts feature
pub fn routes(service: Arc<ContactService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/contacts",
            post(create_contact)
                .layer(DefaultBodyLimit::max(max_body_size))
                .get(list_contacts),
        )
        .route("/api/contacts/{id}", get(get_contact).delete(delete_contact))
        .with_state(service)
}
