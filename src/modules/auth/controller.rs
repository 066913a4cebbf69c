use anyhow::anyhow;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, MessageResponse, RequestEmailDto, SignupRequest, TokenResponse,
};
use super::service::AuthService;
use crate::modules::users::model::UserRead;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// 1x1 transparent PNG served as the email-open tracking pixel.
const TRACKING_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Register a new user and send a confirmation email
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered, confirmation email queued", body = UserRead),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserRead>), AppError> {
    let user = AuthService::signup(&state.db, dto, &state.jwt_config, &state.email_config).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials or email not confirmed", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(tokens))
}

/// Rotate the token pair using a refresh token
#[utoipa::path(
    get,
    path = "/auth/refresh_token",
    responses(
        (status = 200, description = "New token pair issued", body = TokenResponse),
        (status = 401, description = "Invalid or mismatched refresh token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, headers))]
pub async fn refresh_token(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    let tokens = AuthService::refresh(&state.db, token, &state.jwt_config).await?;
    Ok(Json(tokens))
}

/// Confirm an email address via the emailed token
#[utoipa::path(
    get,
    path = "/auth/confirmed_email/{token}",
    params(("token" = String, Path, description = "Email confirmation token")),
    responses(
        (status = 200, description = "Email confirmed (or already confirmed)", body = MessageResponse),
        (status = 400, description = "Verification error", body = ErrorResponse),
        (status = 422, description = "Invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, token))]
pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let already_confirmed = AuthService::confirm_email(&state.db, &token, &state.jwt_config).await?;

    let message = if already_confirmed {
        "Your email is already confirmed"
    } else {
        "Email confirmed"
    };

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// Request a new confirmation email
#[utoipa::path(
    post,
    path = "/auth/request_email",
    request_body = RequestEmailDto,
    responses(
        (status = 200, description = "Neutral response; email re-sent if applicable", body = MessageResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn request_email(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RequestEmailDto>,
) -> Result<Json<MessageResponse>, AppError> {
    let already_confirmed = AuthService::request_email(
        &state.db,
        &dto.email,
        &state.jwt_config,
        &state.email_config,
    )
    .await?;

    let message = if already_confirmed {
        "Your email is already confirmed"
    } else {
        "Check your email for confirmation."
    };

    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}

/// Email-open tracking pixel
#[utoipa::path(
    get,
    path = "/auth/{username}",
    params(("username" = String, Path, description = "Username from the email link")),
    responses(
        (status = 200, description = "Tracking pixel", content_type = "image/png")
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn track_email_open(Path(username): Path<String>) -> impl IntoResponse {
    info!(username = %username, "Confirmation email opened");

    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        TRACKING_PIXEL,
    )
}
