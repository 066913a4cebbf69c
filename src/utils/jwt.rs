//! JWT creation and verification.
//!
//! Three token kinds are issued, distinguished by the `scope` claim:
//! access tokens for API calls, refresh tokens for rotating the pair,
//! and email tokens embedded in confirmation links. The subject is
//! always the user id.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

pub const SCOPE_ACCESS: &str = "access_token";
pub const SCOPE_REFRESH: &str = "refresh_token";
pub const SCOPE_EMAIL: &str = "email_token";

/// Email confirmation links stay valid for one day.
const EMAIL_TOKEN_EXPIRY: i64 = 86_400;

fn create_token(
    user_id: Uuid,
    scope: &str,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = (now + expiry_secs) as usize;
    let now = now as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        scope: scope.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token(
        user_id,
        SCOPE_ACCESS,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token(
        user_id,
        SCOPE_REFRESH,
        jwt_config.refresh_token_expiry,
        jwt_config,
    )
}

pub fn create_email_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    create_token(user_id, SCOPE_EMAIL, EMAIL_TOKEN_EXPIRY, jwt_config)
}

/// Decodes a token and checks that its `scope` claim matches.
pub fn verify_token(
    token: &str,
    expected_scope: &str,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))?;

    if claims.scope != expected_scope {
        return Err(AppError::unauthorized(anyhow!("Invalid scope for token")));
    }

    Ok(claims)
}

/// Parses the subject claim back into a user id.
pub fn user_id_from_claims(claims: &Claims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))
}
