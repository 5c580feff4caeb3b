//! Router assembly shared by the binary and the end-to-end tests.

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::case_studies::{routes as case_studies_routes, CaseStudyService};
use crate::features::contacts::{routes as contacts_routes, ContactService};
use crate::features::insights::{routes as insights_routes, InsightService};

/// Every service the HTTP layer dispatches to
pub struct AppServices {
    pub auth: Arc<AuthService>,
    pub contacts: Arc<ContactService>,
    pub insights: Arc<InsightService>,
    pub case_studies: Arc<CaseStudyService>,
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_routes(config: &Config) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match config.swagger.credentials() {
        Some(credentials) => {
            tracing::info!("Swagger UI basic auth enabled");
            swagger.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
        }
        None => {
            tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
            swagger
        }
    }
}

pub fn build_router(services: AppServices, config: &Config) -> Router {
    // Every API route sees the caller's session, anonymous or not
    let api_routes = Router::new()
        .merge(auth_routes::routes(Arc::clone(&services.auth)))
        .merge(contacts_routes::routes(
            services.contacts,
            config.upload.max_body_size(),
        ))
        .merge(insights_routes::routes(services.insights))
        .merge(case_studies_routes::routes(services.case_studies))
        .route_layer(from_fn_with_state(
            services.auth,
            middleware::session_middleware,
        ));

    Router::new()
        .merge(swagger_routes(config))
        .merge(api_routes)
        .route("/health", get(health_check))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
