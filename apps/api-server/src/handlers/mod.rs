//! HTTP handlers and route configuration.

mod categories;
mod health;
mod transactions;
mod users;


use actix_web::web;

use fintrack_core::domain::User;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Protected routes
        .route("/users/initialize", web::post().to(users::initialize))
        .service(
            web::scope("/transactions")
                // Fixed segments before the `{id}` matchers.
                .route("/summary", web::get().to(transactions::summary))
                .route("/history", web::get().to(transactions::history))
                .route("", web::get().to(transactions::list))
                .route("", web::post().to(transactions::create))
                .route("/{id}", web::put().to(transactions::update))
                .route("/{id}", web::delete().to(transactions::remove)),
        )
        .service(
            web::scope("/categories")
                .route("", web::get().to(categories::list))
                .route("", web::post().to(categories::create))
                .route("/{id}", web::put().to(categories::update))
                .route("/{id}", web::delete().to(categories::remove)),
        );
}

/// Resolve the authenticated identity to its stored user profile.
///
/// A valid token whose profile was never initialized reads as unauthorized;
/// the client calls `POST /users/initialize` right after sign-in.
pub(crate) async fn current_user(state: &AppState, identity: &Identity) -> AppResult<User> {
    state
        .users
        .find_by_subject(&identity.subject)
        .await?
        .ok_or(AppError::Unauthorized)
}
