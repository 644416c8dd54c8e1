//! Application builder: wires repositories, services, router, and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ledgerdesk_auth::{
    JwtDecoder, JwtEncoder, OAuthVerifier, PasswordHasher, PasswordValidator, TokenRevocationList,
};
use ledgerdesk_core::config::{AppConfig, ServerConfig};
use ledgerdesk_core::error::AppError;
use ledgerdesk_core::traits::{Mailer, ObjectStore};
use ledgerdesk_database::DatabasePool;
use ledgerdesk_database::repositories::{
    BlogRepository, ContactRepository, FileRepository, FolderRepository, FormRepository,
    FormResponseRepository, IdentityRepository, LinkRepository, NotificationRepository,
    TestimonialRepository, UserRepository,
};
use ledgerdesk_service::auth::LockoutPolicy;
use ledgerdesk_service::file::TransferLimits;
use ledgerdesk_service::{
    AdminUserService, AuthService, BlogService, ContactService, FileService, FolderService,
    FormBuilderService, FormFillService, LinkService, NotificationService, SessionValidator,
    TestimonialService, UserService,
};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// JSON bodies are small; file bytes go straight to the object store.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, server: &ServerConfig) -> Router {
    build_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&server.cors))
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}

/// Construct repositories and services and bundle them into [`AppState`].
pub fn build_state(
    config: AppConfig,
    db_pool: DatabasePool,
    store: Arc<dyn ObjectStore>,
    mailer: Arc<dyn Mailer>,
) -> Result<AppState, AppError> {
    let pool = db_pool.pool().clone();

    // Repositories
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let identity_repo = Arc::new(IdentityRepository::new(pool.clone()));
    let file_repo = Arc::new(FileRepository::new(pool.clone()));
    let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
    let form_repo = Arc::new(FormRepository::new(pool.clone()));
    let response_repo = Arc::new(FormResponseRepository::new(pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone()));
    let testimonial_repo = Arc::new(TestimonialRepository::new(pool.clone()));
    let contact_repo = Arc::new(ContactRepository::new(pool.clone()));
    let link_repo = Arc::new(LinkRepository::new(pool.clone()));
    let blog_repo = Arc::new(BlogRepository::new(pool));

    // Auth
    let revocations = TokenRevocationList::new(config.auth.access_ttl());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth, revocations.clone()));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let oauth = Arc::new(OAuthVerifier::new(config.auth.oauth.clone())?);
    let session_validator = Arc::new(SessionValidator::new(Arc::clone(&user_repo)));

    // Services
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&user_repo),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        identity_repo,
        Arc::clone(&password_hasher),
        jwt_encoder,
        revocations,
        oauth,
        LockoutPolicy::from_config(&config.auth),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&password_validator),
        Arc::clone(&session_validator),
    ));
    let admin_user_service = Arc::new(AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&file_repo),
        Arc::clone(&store),
        password_hasher,
        password_validator,
        mailer,
        Arc::clone(&session_validator),
        config.mail.portal_url.clone(),
    ));
    let file_service = Arc::new(FileService::new(
        file_repo,
        user_repo,
        Arc::clone(&store),
        Arc::clone(&notification_service),
        TransferLimits::from(&config.storage),
    ));
    let folder_service = Arc::new(FolderService::new(folder_repo, Arc::clone(&store)));
    let form_builder_service = Arc::new(FormBuilderService::new(
        Arc::clone(&form_repo),
        Arc::clone(&response_repo),
    ));
    let form_fill_service = Arc::new(FormFillService::new(form_repo, response_repo));
    let testimonial_service = Arc::new(TestimonialService::new(testimonial_repo));
    let contact_service = Arc::new(ContactService::new(
        contact_repo,
        Arc::clone(&notification_service),
    ));
    let link_service = Arc::new(LinkService::new(link_repo));
    let blog_service = Arc::new(BlogService::new(blog_repo));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        store,
        jwt_decoder,
        session_validator,
        auth_service,
        user_service,
        admin_user_service,
        file_service,
        folder_service,
        form_builder_service,
        form_fill_service,
        notification_service,
        testimonial_service,
        contact_service,
        link_service,
        blog_service,
    })
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let server = state.config.server.clone();
    let app = build_app(state, &server);

    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "LedgerDesk server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
