use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::jwt::{
    SCOPE_EMAIL, SCOPE_REFRESH, create_access_token, create_email_token, create_refresh_token,
    user_id_from_claims, verify_token,
};
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, SignupRequest, TokenResponse};

pub struct AuthService;

impl AuthService {
    /// Registers a new user and kicks off the confirmation email in the
    /// background. The account stays unconfirmed until the emailed link
    /// is opened.
    #[instrument(skip(db, dto, jwt_config, email_config))]
    pub async fn signup(
        db: &PgPool,
        dto: SignupRequest,
        jwt_config: &JwtConfig,
        email_config: &EmailConfig,
    ) -> Result<User, AppError> {
        let existing = UserService::get_user_by_email(db, &dto.email).await?;
        if existing.is_some() {
            return Err(AppError::conflict(anyhow!("Account already exists")));
        }

        let hashed = hash_password(&dto.password)?;
        let user = UserService::create_user(db, &dto.username, &dto.email, &hashed).await?;

        Self::spawn_confirmation_email(&user, jwt_config, email_config);

        Ok(user)
    }

    /// Authenticates credentials and issues a token pair.
    ///
    /// Unknown email, wrong password, and unconfirmed accounts all fail
    /// with 401; the first two share a message so the response doesn't
    /// leak which emails are registered.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let user = UserService::get_user_by_email(db, &dto.email)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid credentials")))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized(anyhow!("Invalid credentials")));
        }

        if !user.confirmed {
            return Err(AppError::unauthorized(anyhow!("Email not confirmed")));
        }

        Self::issue_tokens(db, user.id, jwt_config).await
    }

    /// Rotates the token pair from a refresh token.
    ///
    /// The presented token must match the one stored for the user; on
    /// mismatch the stored token is cleared so a stolen older token
    /// cannot be replayed later.
    #[instrument(skip(db, refresh_token, jwt_config))]
    pub async fn refresh(
        db: &PgPool,
        refresh_token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let claims = verify_token(refresh_token, SCOPE_REFRESH, jwt_config)?;
        let user_id = user_id_from_claims(&claims)?;

        let user = UserService::get_user_by_id(db, user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid refresh token")))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            UserService::update_refresh_token(db, user.id, None).await?;
            return Err(AppError::unauthorized(anyhow!("Invalid refresh token")));
        }

        Self::issue_tokens(db, user.id, jwt_config).await
    }

    /// Confirms the email address carried by a confirmation token.
    ///
    /// Returns `true` if the account was already confirmed.
    #[instrument(skip(db, token, jwt_config))]
    pub async fn confirm_email(
        db: &PgPool,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<bool, AppError> {
        let user_id = verify_token(token, SCOPE_EMAIL, jwt_config)
            .and_then(|claims| user_id_from_claims(&claims))
            .map_err(|_| AppError::unprocessable(anyhow!("Invalid token for email verification")))?;

        let user = UserService::get_user_by_id(db, user_id)
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!("Verification error")))?;

        if user.confirmed {
            return Ok(true);
        }

        UserService::confirm_email(db, user.id).await?;
        Ok(false)
    }

    /// Re-sends the confirmation email for an unconfirmed account.
    ///
    /// Returns `true` if the account exists and is already confirmed.
    /// A missing account is not an error so the endpoint stays neutral.
    #[instrument(skip(db, jwt_config, email_config))]
    pub async fn request_email(
        db: &PgPool,
        email: &str,
        jwt_config: &JwtConfig,
        email_config: &EmailConfig,
    ) -> Result<bool, AppError> {
        let Some(user) = UserService::get_user_by_email(db, email).await? else {
            return Ok(false);
        };

        if user.confirmed {
            return Ok(true);
        }

        Self::spawn_confirmation_email(&user, jwt_config, email_config);
        Ok(false)
    }

    async fn issue_tokens(
        db: &PgPool,
        user_id: Uuid,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let access_token = create_access_token(user_id, jwt_config)?;
        let refresh_token = create_refresh_token(user_id, jwt_config)?;

        UserService::update_refresh_token(db, user_id, Some(&refresh_token)).await?;

        Ok(TokenResponse::bearer(access_token, refresh_token))
    }

    /// Sends the confirmation email off the request path. Failures are
    /// logged; the HTTP response never depends on SMTP health.
    fn spawn_confirmation_email(user: &User, jwt_config: &JwtConfig, email_config: &EmailConfig) {
        let token = match create_email_token(user.id, jwt_config) {
            Ok(token) => token,
            Err(e) => {
                error!(user_id = %user.id, error = %e.error, "Failed to create email token");
                return;
            }
        };

        let service = EmailService::new(email_config.clone());
        let email = user.email.clone();
        let username = user.username.clone();

        tokio::spawn(async move {
            match service
                .send_confirmation_email(&email, &username, &token)
                .await
            {
                Ok(()) => info!(to = %email, "Confirmation email sent"),
                Err(e) => error!(to = %email, error = %e.error, "Failed to send confirmation email"),
            }
        });
    }
}
