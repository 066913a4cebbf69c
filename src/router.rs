use std::sync::Arc;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::user_agent::user_agent_ban_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::contacts::router::init_contacts_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::response::Html;
use anyhow::anyhow;
use axum::{Json, Router, middleware, routing::get};
use serde_json::json;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let users_governor = Arc::new(state.rate_limit_config.users_governor_config());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(index))
        .nest(
            "/api",
            Router::new()
                .route("/healthchecker", get(healthchecker))
                .nest("/contacts", init_contacts_router())
                .nest(
                    "/users",
                    init_users_router().layer(GovernorLayer::new(users_governor)),
                ),
        )
        .nest("/auth", init_auth_router())
        .nest_service(
            "/static",
            ServeDir::new(state.storage_config.upload_dir.clone()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(user_agent_ban_middleware))
}

async fn index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Contactly API</title>
</head>
<body>
    <h1>Contactly API</h1>
    <p>A REST API for managing your contacts.</p>
    <ul>
        <li><a href="/swagger-ui">Swagger UI</a></li>
        <li><a href="/scalar">Scalar</a></li>
    </ul>
</body>
</html>"#,
    )
}

/// Verifies the database connection is alive.
#[utoipa::path(
    get,
    path = "/api/healthchecker",
    tag = "Health",
    responses(
        (status = 200, description = "API and database are healthy"),
        (status = 500, description = "Database is unreachable", body = crate::modules::auth::controller::ErrorResponse)
    )
)]
pub async fn healthchecker(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.db)
        .await
        .map_err(|e| AppError::internal(anyhow!("Database connectivity check failed: {}", e)))?;

    Ok(Json(json!({ "message": "Welcome to Contactly" })))
}
