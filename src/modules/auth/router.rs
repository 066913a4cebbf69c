use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    confirm_email, login, refresh_token, request_email, signup, track_email_open,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh_token", get(refresh_token))
        .route("/confirmed_email/{token}", get(confirm_email))
        .route("/request_email", post(request_email))
        .route("/{username}", get(track_email_open))
}
