//! User profile handlers.

use actix_web::{HttpResponse, web};

use fintrack_core::domain::User;
use fintrack_shared::dto::{InitializeUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /users/initialize
///
/// Upsert the authenticated user's profile from the token claims plus any
/// profile fields in the body. Idempotent: the first call creates the
/// profile (201), later calls refresh it (200).
pub async fn initialize(
    state: web::Data<AppState>,
    identity: Identity,
    body: Option<web::Json<InitializeUserRequest>>,
) -> AppResult<HttpResponse> {
    let req = body.map(|b| b.into_inner()).unwrap_or_default();

    let existing = state.users.find_by_subject(&identity.subject).await?;
    let created = existing.is_none();

    let mut user = existing.unwrap_or_else(|| {
        tracing::info!(subject = %identity.subject, "Initializing new user profile");
        User::new(identity.subject.clone(), identity.email.clone())
    });

    // Body fields win over token claims; neither being present keeps the
    // stored value.
    user.email = identity.email.clone();
    if let Some(name) = req.display_name.or_else(|| identity.display_name.clone()) {
        user.display_name = Some(name);
    }
    if let Some(url) = req.photo_url.or_else(|| identity.photo_url.clone()) {
        user.photo_url = Some(url);
    }
    user.updated_at = chrono::Utc::now();

    let saved = state.users.save(user).await?;

    let response = UserResponse {
        id: saved.id,
        email: saved.email,
        display_name: saved.display_name,
        photo_url: saved.photo_url,
        created_at: saved.created_at,
    };

    if created {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
