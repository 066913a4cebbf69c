use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::User;
use crate::utils::avatar::gravatar_url;
use crate::utils::errors::AppError;

const USER_COLUMNS: &str =
    "id, username, email, password, avatar, refresh_token, role, confirmed, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Inserts a new, unconfirmed user with a Gravatar-derived avatar.
    ///
    /// The password must already be hashed by the caller.
    #[instrument(skip(db, hashed_password))]
    pub async fn create_user(
        db: &PgPool,
        username: &str,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AppError> {
        let avatar = gravatar_url(email);

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, avatar)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(hashed_password)
        .bind(avatar)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Stores (or clears) the user's current refresh token.
    #[instrument(skip(db, token))]
    pub async fn update_refresh_token(
        db: &PgPool,
        user_id: Uuid,
        token: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_token = $1, updated_at = now() WHERE id = $2")
            .bind(token)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn confirm_email(db: &PgPool, user_id: Uuid) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE users SET confirmed = TRUE, updated_at = now() WHERE id = $1")
                .bind(user_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn update_avatar_url(
        db: &PgPool,
        user_id: Uuid,
        url: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET avatar = $1, updated_at = now() WHERE id = $2
             RETURNING {USER_COLUMNS}"
        ))
        .bind(url)
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(user)
    }
}
