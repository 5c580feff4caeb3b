use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::insights::{handlers, services::InsightService};

/// Insight routes. `{key}` is the slug for reads and the id for writes.
pub fn routes(service: Arc<InsightService>) -> Router {
    Router::new()
        .route(
            "/api/insights",
            get(handlers::list_insights).post(handlers::create_insight),
        )
        .route(
            "/api/insights/{key}",
            get(handlers::get_insight)
                .put(handlers::update_insight)
                .delete(handlers::delete_insight),
        )
        .with_state(service)
}
