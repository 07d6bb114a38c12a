/**
 * Post and User Handlers
 *
 * Handlers that depend on the caller identity attached by the token
 * middleware.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

use crate::backend::auth::guard::authorize_resource;
use crate::backend::auth::handlers::types::DataResponse;
use crate::backend::auth::resources::PostStore;
use crate::backend::auth::service::AuthService;
use crate::backend::error::{BackendError, StoreError};
use crate::backend::middleware::auth::AuthUser;
use crate::shared::{Identity, NewPost, Post, PostChanges};

const SLUG_TAKEN_MESSAGE: &str = "Slug must be unique";

fn slug_conflict(err: StoreError) -> BackendError {
    match err {
        StoreError::Duplicate(slug) => {
            tracing::warn!("Post slug already taken: {}", slug);
            BackendError::conflict(SLUG_TAKEN_MESSAGE)
        }
        other => other.into(),
    }
}

/// Create a post authored by the caller
///
/// Any `authorId` in the body is ignored; the author is the token subject.
///
/// # Errors
///
/// * `400 Bad Request` - If a field is blank
/// * `409 Conflict` - If the slug is taken
pub async fn create_post(
    State(posts): State<Arc<dyn PostStore>>,
    AuthUser(caller): AuthUser,
    Json(fields): Json<PostChanges>,
) -> Result<(StatusCode, Json<DataResponse<Post>>), BackendError> {
    fields.validate()?;

    let post = posts
        .create(NewPost {
            author_id: caller.subject_id,
            fields,
        })
        .await
        .map_err(slug_conflict)?;

    tracing::info!("Post {} created by subject {}", post.id, caller.subject_id);
    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

/// Replace a post's title, slug and content
///
/// The caller must own the post or be an admin. The author never changes.
///
/// # Errors
///
/// * `400 Bad Request` - If a field is blank
/// * `403 Forbidden` - If the caller is neither owner nor admin
/// * `404 Not Found` - If the post does not exist
/// * `409 Conflict` - If another post has the slug
pub async fn update_post(
    State(posts): State<Arc<dyn PostStore>>,
    AuthUser(caller): AuthUser,
    Path(post_id): Path<i64>,
    Json(changes): Json<PostChanges>,
) -> Result<Json<DataResponse<Post>>, BackendError> {
    changes.validate()?;
    authorize_resource(posts.as_ref(), &caller, post_id).await?;

    let post = posts
        .update(post_id, changes)
        .await
        .map_err(slug_conflict)?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    tracing::info!("Post {} updated by subject {}", post_id, caller.subject_id);
    Ok(Json(DataResponse::new(post)))
}

/// Delete a post
///
/// The caller must own the post or be an admin.
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is neither owner nor admin
/// * `404 Not Found` - If the post does not exist
pub async fn delete_post(
    State(posts): State<Arc<dyn PostStore>>,
    AuthUser(caller): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<serde_json::Value>, BackendError> {
    authorize_resource(posts.as_ref(), &caller, post_id).await?;

    if !posts.delete(post_id).await? {
        return Err(BackendError::not_found("Post not found"));
    }

    tracing::info!("Post {} deleted by subject {}", post_id, caller.subject_id);
    Ok(Json(serde_json::json!({ "message": "Delete success" })))
}

/// Get any user by id (admin route)
pub async fn get_user(
    State(service): State<AuthService>,
    Path(user_id): Path<i64>,
) -> Result<Json<DataResponse<Identity>>, BackendError> {
    let identity = service.find_identity(user_id).await?;
    Ok(Json(DataResponse::new(identity)))
}
