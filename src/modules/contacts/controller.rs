use anyhow::anyhow;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::validator::{ValidatedJson, ValidatedQuery};

use super::model::{Contact, CreateContactDto, SearchParams, UpdateContactDto};
use super::service::ContactService;

/// Create a new contact for the current user
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Duplicate email or phone", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, dto, current_user))]
pub async fn create_contact(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateContactDto>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = ContactService::create_contact(&state.db, dto, current_user.id).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// List the current user's contacts with pagination
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, clamped to 1..=500 (default 10)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip (default 0)")
    ),
    responses(
        (status = 200, description = "List of contacts", body = Vec<Contact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, current_user))]
pub async fn get_all_contacts(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts =
        ContactService::get_all_contacts(&state.db, params.limit(), params.offset(), current_user.id)
            .await?;
    Ok(Json(contacts))
}

/// Fetch a contact by id
#[utoipa::path(
    get,
    path = "/api/contacts/{contact_id}",
    params(("contact_id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = Contact),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, current_user))]
pub async fn get_contact(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(contact_id): Path<Uuid>,
) -> Result<Json<Contact>, AppError> {
    let contact = ContactService::get_contact(&state.db, contact_id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Contact not found")))?;
    Ok(Json(contact))
}

/// Update a contact (partial)
#[utoipa::path(
    put,
    path = "/api/contacts/{contact_id}",
    params(("contact_id" = Uuid, Path, description = "Contact id")),
    request_body = UpdateContactDto,
    responses(
        (status = 200, description = "Updated contact", body = Contact),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 409, description = "Duplicate email or phone", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, dto, current_user))]
pub async fn update_contact(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(contact_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateContactDto>,
) -> Result<Json<Contact>, AppError> {
    let contact = ContactService::update_contact(&state.db, contact_id, dto, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Contact not found")))?;
    Ok(Json(contact))
}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/contacts/{contact_id}",
    params(("contact_id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, current_user))]
pub async fn delete_contact(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(contact_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ContactService::delete_contact(&state.db, contact_id, current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Contact not found")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search contacts by name or email
#[utoipa::path(
    get,
    path = "/api/contacts/search/",
    params(("query" = String, Query, description = "Substring to match (case-insensitive)")),
    responses(
        (status = 200, description = "Matching contacts", body = Vec<Contact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Empty query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, current_user))]
pub async fn search_contacts(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts =
        ContactService::search_contacts(&state.db, &params.query, current_user.id).await?;
    Ok(Json(contacts))
}

/// Contacts with birthdays in the next 7 days
#[utoipa::path(
    get,
    path = "/api/contacts/upcoming/birthdays",
    responses(
        (status = 200, description = "Contacts with upcoming birthdays", body = Vec<Contact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contacts"
)]
#[instrument(skip(state, current_user))]
pub async fn upcoming_birthdays(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = ContactService::upcoming_birthdays(&state.db, current_user.id).await?;
    Ok(Json(contacts))
}
