use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Contact, CreateContactDto, UpdateContactDto};

const CONTACT_COLUMNS: &str =
    "id, first_name, last_name, email, phone, birthday, extra_info, user_id, created_at, updated_at";

pub struct ContactService;

impl ContactService {
    /// Creates a contact for the owner, rejecting duplicate email or
    /// phone within their contact list.
    #[instrument(skip(db, dto))]
    pub async fn create_contact(
        db: &PgPool,
        dto: CreateContactDto,
        user_id: Uuid,
    ) -> Result<Contact, AppError> {
        let duplicate = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM contacts WHERE user_id = $1 AND (email = $2 OR phone = $3)",
        )
        .bind(user_id)
        .bind(&dto.email)
        .bind(&dto.phone)
        .fetch_optional(db)
        .await?;

        if duplicate.is_some() {
            return Err(AppError::conflict(anyhow!(
                "Contact with this email or phone already exists"
            )));
        }

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "INSERT INTO contacts (first_name, last_name, email, phone, birthday, extra_info, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(dto.birthday)
        .bind(&dto.extra_info)
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(contact)
    }

    #[instrument(skip(db))]
    pub async fn get_all_contacts(
        db: &PgPool,
        limit: i64,
        offset: i64,
        user_id: Uuid,
    ) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE user_id = $1
             ORDER BY created_at, id
             OFFSET $2 LIMIT $3"
        ))
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(db)
        .await?;

        Ok(contacts)
    }

    #[instrument(skip(db))]
    pub async fn get_contact(
        db: &PgPool,
        contact_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND user_id = $2"
        ))
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(contact)
    }

    /// Applies a partial update. Only fields present in the DTO change;
    /// a new email or phone must not collide with another contact of
    /// the same owner.
    #[instrument(skip(db, dto))]
    pub async fn update_contact(
        db: &PgPool,
        contact_id: Uuid,
        dto: UpdateContactDto,
        user_id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let Some(existing) = Self::get_contact(db, contact_id, user_id).await? else {
            return Ok(None);
        };

        if dto.email.is_some() || dto.phone.is_some() {
            let email = dto.email.as_deref().unwrap_or(&existing.email);
            let phone = dto.phone.as_deref().unwrap_or(&existing.phone);

            let duplicate = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM contacts
                 WHERE user_id = $1 AND (email = $2 OR phone = $3) AND id != $4",
            )
            .bind(user_id)
            .bind(email)
            .bind(phone)
            .bind(contact_id)
            .fetch_optional(db)
            .await?;

            if duplicate.is_some() {
                return Err(AppError::conflict(anyhow!(
                    "Another contact with this email or phone already exists"
                )));
            }
        }

        let contact = sqlx::query_as::<_, Contact>(&format!(
            "UPDATE contacts SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                birthday = COALESCE($5, birthday),
                extra_info = COALESCE($6, extra_info),
                updated_at = now()
             WHERE id = $7 AND user_id = $8
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(dto.birthday)
        .bind(&dto.extra_info)
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(contact)
    }

    /// Deletes a contact, returning it if it existed.
    #[instrument(skip(db))]
    pub async fn delete_contact(
        db: &PgPool,
        contact_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            "DELETE FROM contacts WHERE id = $1 AND user_id = $2
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(contact)
    }

    /// Case-insensitive substring search across first name, last name,
    /// and email.
    #[instrument(skip(db))]
    pub async fn search_contacts(
        db: &PgPool,
        query: &str,
        user_id: Uuid,
    ) -> Result<Vec<Contact>, AppError> {
        let pattern = format!("%{}%", query);

        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE user_id = $1
               AND (first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
             ORDER BY last_name, first_name"
        ))
        .bind(user_id)
        .bind(pattern)
        .fetch_all(db)
        .await?;

        Ok(contacts)
    }

    /// Contacts whose birthday falls in the next 7 days, compared by
    /// month and day so the birth year is irrelevant. The second branch
    /// covers the window wrapping past December 31.
    #[instrument(skip(db))]
    pub async fn upcoming_birthdays(db: &PgPool, user_id: Uuid) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE user_id = $1
               AND (
                 (to_char(CURRENT_DATE, 'MMDD') <= to_char(CURRENT_DATE + 7, 'MMDD')
                  AND to_char(birthday, 'MMDD') BETWEEN to_char(CURRENT_DATE, 'MMDD')
                                                    AND to_char(CURRENT_DATE + 7, 'MMDD'))
                 OR
                 (to_char(CURRENT_DATE, 'MMDD') > to_char(CURRENT_DATE + 7, 'MMDD')
                  AND (to_char(birthday, 'MMDD') >= to_char(CURRENT_DATE, 'MMDD')
                       OR to_char(birthday, 'MMDD') <= to_char(CURRENT_DATE + 7, 'MMDD')))
               )
             ORDER BY to_char(birthday, 'MMDD')"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(contacts)
    }
}
