//! Shared application state passed to every handler.

use std::sync::Arc;

use ledgerdesk_auth::JwtDecoder;
use ledgerdesk_core::config::AppConfig;
use ledgerdesk_core::traits::ObjectStore;
use ledgerdesk_database::DatabasePool;
use ledgerdesk_service::{
    AdminUserService, AuthService, BlogService, ContactService, FileService, FolderService,
    FormBuilderService, FormFillService, LinkService, NotificationService, SessionValidator,
    TestimonialService, UserService,
};

/// Application state cloned into each request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, used by the readiness check.
    pub db_pool: DatabasePool,
    /// Object store, used by the readiness check.
    pub store: Arc<dyn ObjectStore>,
    /// Access token verification.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Checks token subjects against their current account.
    pub session_validator: Arc<SessionValidator>,

    /// Sign-in and sign-out.
    pub auth_service: Arc<AuthService>,
    /// Self-service profile.
    pub user_service: Arc<UserService>,
    /// Admin user management.
    pub admin_user_service: Arc<AdminUserService>,
    /// File exchange.
    pub file_service: Arc<FileService>,
    /// Virtual folders.
    pub folder_service: Arc<FolderService>,
    /// Form builder (admin).
    pub form_builder_service: Arc<FormBuilderService>,
    /// Form filling (client).
    pub form_fill_service: Arc<FormFillService>,
    /// Notifications.
    pub notification_service: Arc<NotificationService>,
    /// Testimonials.
    pub testimonial_service: Arc<TestimonialService>,
    /// Contact requests.
    pub contact_service: Arc<ContactService>,
    /// Resource links.
    pub link_service: Arc<LinkService>,
    /// Blog.
    pub blog_service: Arc<BlogService>,
}
