use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::case_studies::{dtos as case_studies_dtos, handlers as case_studies_handlers};
use crate::features::contacts::{dtos as contacts_dtos, handlers as contacts_handlers};
use crate::features::insights::{dtos as insights_dtos, handlers as insights_handlers};
use crate::shared::types::{ApiResponse, Empty, ErrorResponse, FieldError};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::verify_2fa,
        auth::handlers::verify_email,
        auth::handlers::logout,
        auth::handlers::get_current_user,
        // Contacts
        contacts_handlers::create_contact,
        contacts_handlers::list_contacts,
        contacts_handlers::get_contact,
        contacts_handlers::delete_contact,
        // Insights
        insights_handlers::list_insights,
        insights_handlers::get_insight,
        insights_handlers::create_insight,
        insights_handlers::update_insight,
        insights_handlers::delete_insight,
        // Case studies
        case_studies_handlers::list_case_studies,
        case_studies_handlers::get_case_study,
        case_studies_handlers::create_case_study,
        case_studies_handlers::update_case_study,
        case_studies_handlers::delete_case_study,
    ),
    components(
        schemas(
            // Shared
            Empty,
            ErrorResponse,
            FieldError,
            ApiResponse<Empty>,
            // Auth
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::VerifyCodeRequestDto,
            auth::dtos::LoginResponseDto,
            auth::dtos::UserResponseDto,
            ApiResponse<auth::dtos::LoginResponseDto>,
            ApiResponse<auth::dtos::UserResponseDto>,
            // Contacts
            contacts_dtos::ContactFormDto,
            contacts_dtos::ContactResponseDto,
            contacts_dtos::AttachmentResponseDto,
            contacts_dtos::ContactDetailDto,
            contacts_dtos::ContactListDto,
            ApiResponse<contacts_dtos::ContactDetailDto>,
            ApiResponse<contacts_dtos::ContactListDto>,
            // Insights
            insights_dtos::CreateInsightDto,
            insights_dtos::UpdateInsightDto,
            insights_dtos::InsightResponseDto,
            insights_dtos::InsightEnvelopeDto,
            insights_dtos::InsightListDto,
            ApiResponse<insights_dtos::InsightEnvelopeDto>,
            ApiResponse<insights_dtos::InsightListDto>,
            // Case studies
            case_studies_dtos::CreateCaseStudyDto,
            case_studies_dtos::UpdateCaseStudyDto,
            case_studies_dtos::CaseStudyResponseDto,
            case_studies_dtos::CaseStudyEnvelopeDto,
            case_studies_dtos::CaseStudyListDto,
            ApiResponse<case_studies_dtos::CaseStudyEnvelopeDto>,
            ApiResponse<case_studies_dtos::CaseStudyListDto>,
        )
    ),
    tags(
        (name = "auth", description = "Administrator registration, two-step login and session"),
        (name = "contacts", description = "Contact form submissions and attachments"),
        (name = "insights", description = "Insight articles"),
        (name = "case-studies", description = "Client case studies"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Consulting Site API",
        version = "0.1.0",
        description = "API documentation for the consulting website",
    )
)]
pub struct ApiDoc;

/// Adds the session cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("sid"))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
