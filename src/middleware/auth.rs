use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{SCOPE_ACCESS, user_id_from_claims, verify_token};

/// Extractor that validates the Bearer access token and loads the
/// authenticated user.
///
/// The lookup is cache-aside: the Redis cache is consulted first and
/// repopulated on miss, so repeated requests don't hit the database.
/// If Redis is unavailable the extractor falls through to the database.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

        let claims = verify_token(token, SCOPE_ACCESS, &state.jwt_config)?;
        let user_id = user_id_from_claims(&claims)?;

        let cache_key = contactly_cache::keys::users::by_id(user_id);

        if let Some(cache) = &state.cache {
            if let Some(user) = cache.get::<User>(&cache_key).await {
                debug!(user_id = %user_id, "Authenticated user served from cache");
                return Ok(CurrentUser(user));
            }
        }

        let user = UserService::get_user_by_id(&state.db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Could not validate credentials")))?;

        if let Some(cache) = &state.cache {
            if let Err(e) = cache.set(&cache_key, &user).await {
                debug!(user_id = %user_id, error = %e, "Failed to cache authenticated user");
            }
        }

        Ok(CurrentUser(user))
    }
}

/// Drops the cached copy of a user, forcing the next authenticated
/// request to reload from the database.
pub async fn invalidate_cached_user(state: &AppState, user_id: uuid::Uuid) {
    if let Some(cache) = &state.cache {
        let key = contactly_cache::keys::users::by_id(user_id);
        if let Err(e) = cache.invalidate(&key).await {
            debug!(user_id = %user_id, error = %e, "Failed to invalidate cached user");
        }
    }
}
