//! User-agent ban middleware.
//!
//! Requests from known scraper user agents are rejected before they
//! reach the router.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use regex::RegexSet;
use serde_json::json;
use std::sync::LazyLock;
use tracing::warn;

static BANNED_USER_AGENTS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"Googlebot", r"Python-urllib"]).expect("invalid user-agent ban patterns")
});

pub async fn user_agent_ban_middleware(req: Request, next: Next) -> Response {
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if BANNED_USER_AGENTS.is_match(user_agent) {
        warn!(user_agent = %user_agent, "Rejected banned user agent");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "You are banned"})),
        )
            .into_response();
    }

    next.run(req).await
}
