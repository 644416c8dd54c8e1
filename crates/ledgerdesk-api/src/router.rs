//! Route definitions for the LedgerDesk HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The admin
//! tree sits behind [`middleware::rbac::admin_only`].

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::handlers::admin;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the shared state.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = admin_routes().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::rbac::admin_only,
    ));

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(user_routes())
        .merge(file_routes())
        .merge(form_routes())
        .merge(notification_routes())
        .merge(public_routes())
        .nest("/admin", admin_routes);

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}

/// Sign-in, sign-out, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/oauth/{provider}", post(handlers::auth::oauth_login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profile self-service
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route("/users/me/password", put(handlers::user::change_password))
}

/// Client document exchange
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::register_file),
        )
        .route("/files/upload-url", post(handlers::file::upload_url))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/{id}/download-url", get(handlers::file::download_url))
}

/// Client form filling
fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/forms", get(handlers::form::list_forms))
        .route("/forms/{id}", get(handlers::form::get_form))
        .route(
            "/forms/{id}/responses",
            post(handlers::form::submit_response),
        )
        .route("/forms/{id}/responses/me", get(handlers::form::my_response))
}

/// Per-user notifications
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/read-all",
            post(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notification::mark_read),
        )
}

/// Marketing site endpoints, no token required
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(handlers::public::list_testimonials))
        .route("/contact", post(handlers::public::submit_contact))
        .route("/links", get(handlers::public::list_links))
        .route("/blog", get(handlers::public::list_posts))
        .route("/blog/{slug}", get(handlers::public::get_post))
}

/// Admin console (mounted at `/api/admin`)
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Users
        .route(
            "/users",
            get(admin::users::list_users).post(admin::users::create_user),
        )
        .route(
            "/users/{id}",
            get(admin::users::get_user)
                .put(admin::users::update_user)
                .delete(admin::users::delete_user),
        )
        .route("/users/{id}/password", put(admin::users::set_password))
        // Files
        .route(
            "/files",
            get(admin::files::list_files).post(admin::files::register_file),
        )
        .route("/files/upload-url", post(admin::files::upload_url))
        .route(
            "/files/{id}",
            put(admin::files::update_file).delete(admin::files::delete_file),
        )
        .route("/files/{id}/download-url", get(admin::files::download_url))
        .route("/files/{id}/archive", post(admin::files::archive_file))
        .route("/files/{id}/unarchive", post(admin::files::unarchive_file))
        // Folders
        .route("/folders", delete(admin::folders::delete))
        .route("/folders/tree", get(admin::folders::tree))
        .route("/folders/contents", get(admin::folders::contents))
        .route("/folders/rename", put(admin::folders::rename))
        .route("/folders/archive", post(admin::folders::archive))
        // Forms
        .route(
            "/forms",
            get(admin::forms::list_forms).post(admin::forms::create_form),
        )
        .route(
            "/forms/{id}",
            get(admin::forms::get_form)
                .put(admin::forms::update_form)
                .delete(admin::forms::delete_form),
        )
        .route("/forms/{id}/publish", post(admin::forms::publish_form))
        .route("/forms/{id}/unpublish", post(admin::forms::unpublish_form))
        .route("/forms/{id}/fields", post(admin::forms::add_field))
        .route(
            "/forms/{id}/fields/{field_id}",
            put(admin::forms::update_field).delete(admin::forms::delete_field),
        )
        .route("/forms/{id}/field-order", put(admin::forms::reorder_fields))
        .route("/forms/{id}/responses", get(admin::forms::list_responses))
        .route(
            "/responses/{id}",
            get(admin::forms::get_response).delete(admin::forms::delete_response),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(admin::testimonials::list).post(admin::testimonials::create),
        )
        .route(
            "/testimonials/{id}",
            get(admin::testimonials::get)
                .put(admin::testimonials::update)
                .delete(admin::testimonials::delete),
        )
        // Contact requests
        .route("/contacts", get(admin::contacts::list))
        .route("/contacts/{id}", delete(admin::contacts::delete))
        .route("/contacts/{id}/close", post(admin::contacts::close))
        .route("/contacts/{id}/reopen", post(admin::contacts::reopen))
        // Links
        .route(
            "/links",
            get(admin::links::list).post(admin::links::create),
        )
        .route(
            "/links/{id}",
            put(admin::links::update).delete(admin::links::delete),
        )
        // Blog
        .route("/blog", get(admin::blog::list).post(admin::blog::create))
        .route(
            "/blog/{id}",
            get(admin::blog::get)
                .put(admin::blog::update)
                .delete(admin::blog::delete),
        )
}
