//! Contact entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A contact owned by a user.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birthday: chrono::NaiveDate,
    pub extra_info: Option<String>,
    pub user_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    #[validate(length(min = 1, max = 50, message = "first_name must be 1 to 50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "last_name must be 1 to 50 characters"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 3, max = 20, message = "phone must be 3 to 20 characters"))]
    pub phone: String,
    pub birthday: chrono::NaiveDate,
    #[validate(length(max = 250, message = "extra_info must be at most 250 characters"))]
    pub extra_info: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateContactDto {
    #[validate(length(min = 1, max = 50, message = "first_name must be 1 to 50 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "last_name must be 1 to 50 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 3, max = 20, message = "phone must be 3 to 20 characters"))]
    pub phone: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    #[validate(length(max = 250, message = "extra_info must be at most 250 characters"))]
    pub extra_info: Option<String>,
}

/// Query parameter for contact search.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SearchParams {
    #[validate(length(min = 1, message = "query must not be empty"))]
    pub query: String,
}
