//! Fixtures for router-level tests: an in-memory application behind a
//! cookie-keeping test client, and a shortcut for admin-only routes.

use axum::{extract::Request, middleware::Next, response::Response, Router};
use axum_test::TestServer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::core::app::{build_router, AppServices};
use crate::core::config::{
    AppConfig, AuthConfig, Config, DatabaseConfig, EmailConfig, SessionConfig, SwaggerConfig,
    UploadConfig,
};
use crate::features::auth::models::{AuthenticatedUser, SessionContext};
use crate::features::auth::repositories::memory::{
    InMemorySessionRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
};
use crate::features::auth::AuthService;
use crate::features::case_studies::repositories::memory::InMemoryCaseStudyRepository;
use crate::features::case_studies::CaseStudyService;
use crate::features::contacts::repositories::memory::InMemoryContactRepository;
use crate::features::contacts::ContactService;
use crate::features::insights::repositories::memory::InMemoryInsightRepository;
use crate::features::insights::InsightService;
use crate::modules::email::recording::RecordingEmailSender;
use crate::modules::email::EmailService;
use crate::modules::storage::LocalDiskStorage;

pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: Uuid::new_v4(),
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        is_admin: true,
        email_verified: true,
    }
}

async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    let user = create_admin_user();
    request.extensions_mut().insert(SessionContext {
        session: None,
        user: Some(user.clone()),
    });
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Serve a feature router as if an administrator were signed in
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

pub fn test_config(upload_dir: PathBuf) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 1,
            max_lifetime_secs: 1,
        },
        session: SessionConfig {
            cookie_name: "sid".to_string(),
            ttl: Duration::from_secs(3600),
            cookie_secure: false,
        },
        auth: AuthConfig {
            login_code_ttl: Duration::from_secs(600),
            email_verification_ttl: Duration::from_secs(86_400),
            bcrypt_cost: 4,
        },
        email: EmailConfig {
            resend_api_key: None,
            resend_api_url: "http://localhost".to_string(),
            from_address: "noreply@example.com".to_string(),
            contact_recipient: "owner@example.com".to_string(),
        },
        upload: UploadConfig {
            dir: upload_dir,
            max_file_size: 10 * 1024 * 1024,
            max_files: 5,
        },
        swagger: SwaggerConfig {
            username: None,
            password: None,
            title: "Test".to_string(),
            version: "0.0.0".to_string(),
            description: "Test".to_string(),
        },
    }
}

/// The whole application on in-memory repositories
pub struct TestApp {
    pub server: TestServer,
    pub users: Arc<InMemoryUserRepository>,
    pub codes: Arc<InMemoryVerificationCodeRepository>,
    pub contacts: Arc<InMemoryContactRepository>,
    pub sender: Arc<RecordingEmailSender>,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("app-uploads-{}", Uuid::new_v4()));
        let config = test_config(upload_dir.clone());

        let users = Arc::new(InMemoryUserRepository::default());
        let codes = Arc::new(InMemoryVerificationCodeRepository::default());
        let sessions = Arc::new(InMemorySessionRepository::default());
        let contacts = Arc::new(InMemoryContactRepository::default());
        let sender = Arc::new(RecordingEmailSender::default());

        let email = Arc::new(
            EmailService::new(sender.clone(), config.email.contact_recipient.clone()).unwrap(),
        );
        let storage = Arc::new(LocalDiskStorage::new(config.upload.clone()).await.unwrap());

        let services = AppServices {
            auth: Arc::new(
                AuthService::new(
                    users.clone(),
                    codes.clone(),
                    sessions,
                    Arc::clone(&email),
                    config.auth.clone(),
                    config.session.clone(),
                )
                .unwrap(),
            ),
            contacts: Arc::new(ContactService::new(
                contacts.clone(),
                storage,
                email,
                config.upload.max_files,
            )),
            insights: Arc::new(InsightService::new(Arc::new(
                InMemoryInsightRepository::default(),
            ))),
            case_studies: Arc::new(CaseStudyService::new(Arc::new(
                InMemoryCaseStudyRepository::default(),
            ))),
        };

        let server = TestServer::builder()
            .save_cookies()
            .build(build_router(services, &config))
            .unwrap();

        Self {
            server,
            users,
            codes,
            contacts,
            sender,
            upload_dir,
        }
    }
}
