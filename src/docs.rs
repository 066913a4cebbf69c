use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MessageResponse, RequestEmailDto, SignupRequest, TokenResponse,
};
use crate::modules::contacts::model::{Contact, CreateContactDto, UpdateContactDto};
use crate::modules::users::model::{Role, UserRead};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::confirm_email,
        crate::modules::auth::controller::request_email,
        crate::modules::auth::controller::track_email_open,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::get_all_contacts,
        crate::modules::contacts::controller::get_contact,
        crate::modules::contacts::controller::update_contact,
        crate::modules::contacts::controller::delete_contact,
        crate::modules::contacts::controller::search_contacts,
        crate::modules::contacts::controller::upcoming_birthdays,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_avatar,
        crate::router::healthchecker,
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            TokenResponse,
            RequestEmailDto,
            MessageResponse,
            Contact,
            CreateContactDto,
            UpdateContactDto,
            UserRead,
            Role,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login, token refresh, email confirmation"),
        (name = "Contacts", description = "Per-user contact management"),
        (name = "Users", description = "Profile and avatar"),
        (name = "Health", description = "Liveness and database connectivity")
    ),
    info(
        title = "Contactly API",
        description = "Multi-user contact management REST API",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
