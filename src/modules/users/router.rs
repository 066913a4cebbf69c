use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{get_me, update_avatar};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/avatar", patch(update_avatar))
}
