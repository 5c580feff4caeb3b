mod core;
mod features;
mod modules;
mod shared;

use crate::core::app::{build_router, AppServices};
use crate::core::config::Config;
use crate::core::database;
use crate::features::auth::repositories::{
    PgSessionRepository, PgUserRepository, PgVerificationCodeRepository,
};
use crate::features::auth::AuthService;
use crate::features::case_studies::repositories::PgCaseStudyRepository;
use crate::features::case_studies::CaseStudyService;
use crate::features::contacts::repositories::PgContactRepository;
use crate::features::contacts::ContactService;
use crate::features::insights::repositories::PgInsightRepository;
use crate::features::insights::InsightService;
use crate::modules::email::{EmailService, ResendClient};
use crate::modules::storage::LocalDiskStorage;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Outbound email
    let email_client = Arc::new(ResendClient::new(&config.email));
    if config.email.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set: outgoing email is disabled");
    }
    let email_service = Arc::new(
        EmailService::new(email_client, config.email.contact_recipient.clone())
            .map_err(|e| anyhow::anyhow!("Failed to load email templates: {}", e))?,
    );
    tracing::info!("Email service initialized");

    // Initialize auth
    let auth_service = Arc::new(
        AuthService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgVerificationCodeRepository::new(pool.clone())),
            Arc::new(PgSessionRepository::new(pool.clone())),
            Arc::clone(&email_service),
            config.auth.clone(),
            config.session.clone(),
        )
        .map_err(|e| anyhow::anyhow!("Failed to initialize auth service: {}", e))?,
    );
    tracing::info!("Auth service initialized");

    // Local upload storage for contact attachments
    let storage = Arc::new(
        LocalDiskStorage::new(config.upload.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize upload storage: {}", e))?,
    );

    let contact_service = Arc::new(ContactService::new(
        Arc::new(PgContactRepository::new(pool.clone())),
        storage,
        Arc::clone(&email_service),
        config.upload.max_files,
    ));
    tracing::info!("Contact service initialized");

    let insight_service = Arc::new(InsightService::new(Arc::new(PgInsightRepository::new(
        pool.clone(),
    ))));
    let case_study_service = Arc::new(CaseStudyService::new(Arc::new(
        PgCaseStudyRepository::new(pool.clone()),
    )));
    tracing::info!("Content services initialized");

    let app = build_router(
        AppServices {
            auth: auth_service,
            contacts: contact_service,
            insights: insight_service,
            case_studies: case_study_service,
        },
        &config,
    );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
