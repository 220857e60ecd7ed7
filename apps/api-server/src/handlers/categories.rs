//! Category handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use fintrack_core::domain::{Category, TransactionType};
use fintrack_shared::ApiResponse;
use fintrack_shared::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};

use super::current_user;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// GET /categories
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;

    let kind = query
        .into_inner()
        .kind
        .map(|k| {
            k.parse::<TransactionType>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .transpose()?;

    let categories = state.categories.list(user.id, kind).await?;
    let response: Vec<CategoryResponse> = categories.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /categories
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let req = body.into_inner();

    let kind = req.kind.parse::<TransactionType>()?;
    let category = Category::new(user.id, req.name, req.color, req.icon, kind)?;

    let saved = state.categories.save(category).await?;
    tracing::debug!(category_id = %saved.id, "Category created");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// PUT /categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let id = path.into_inner();
    let req = body.into_inner();

    let mut category = find_owned(&state, user.id, id).await?;
    category.update(req.name, req.color, req.icon)?;

    let saved = state.categories.save(category).await?;

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// DELETE /categories/{id}
///
/// Deleting a category also removes its transactions (cascade).
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let id = path.into_inner();

    find_owned(&state, user.id, id).await?;
    state.categories.delete(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted")))
}

/// A category must exist and belong to the caller; anything else is 404.
async fn find_owned(state: &AppState, user_id: Uuid, id: Uuid) -> AppResult<Category> {
    state
        .categories
        .find_by_id(id)
        .await?
        .filter(|c| c.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
}

fn to_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        color: category.color,
        icon: category.icon,
        kind: category.kind.to_string(),
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}
