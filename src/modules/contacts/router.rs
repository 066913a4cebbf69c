use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{
    create_contact, delete_contact, get_all_contacts, get_contact, search_contacts,
    update_contact, upcoming_birthdays,
};

pub fn init_contacts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_contacts).post(create_contact))
        .route("/search/", get(search_contacts))
        .route("/upcoming/birthdays", get(upcoming_birthdays))
        .route(
            "/{contact_id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
