use anyhow::anyhow;
use axum::Json;
use axum::extract::{Multipart, State};
use tracing::instrument;

use crate::middleware::auth::{CurrentUser, invalidate_cached_user};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::UserRead;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::avatar::{ALLOWED_AVATAR_TYPES, extension_for};
use crate::utils::errors::AppError;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user profile", body = UserRead),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 429, description = "Rate limited", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(current_user))]
pub async fn get_me(CurrentUser(current_user): CurrentUser) -> Json<UserRead> {
    Json(current_user.into())
}

/// Upload a new avatar for the current user
#[utoipa::path(
    patch,
    path = "/api/users/avatar",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated user profile", body = UserRead),
        (status = 400, description = "Missing or invalid image", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 429, description = "Rate limited", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, current_user, multipart))]
pub async fn update_avatar(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UserRead>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow!("Invalid multipart body: {}", e)))?
        .ok_or_else(|| AppError::bad_request(anyhow!("Missing file field")))?;

    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .ok_or_else(|| AppError::bad_request(anyhow!("Missing file content type")))?;

    let extension = extension_for(&content_type).ok_or_else(|| {
        AppError::bad_request(anyhow!(
            "Content type '{}' not allowed. Allowed types: {}",
            content_type,
            ALLOWED_AVATAR_TYPES.join(", ")
        ))
    })?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::bad_request(anyhow!("Failed to read upload: {}", e)))?;

    let storage = state.storage_config.storage();
    let url = storage
        .save_avatar(current_user.id, extension, &data)
        .await?;

    let user = UserService::update_avatar_url(&state.db, current_user.id, &url).await?;

    // The cached copy still carries the old avatar URL.
    invalidate_cached_user(&state, user.id).await;

    Ok(Json(user.into()))
}
