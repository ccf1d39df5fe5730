use crate::application::auth::login::LoginRequest;
use crate::application::auth::refresh::RefreshRequest;
use crate::application::auth::register::RegisterRequest;
use crate::application::auth::tokens::TokenPair;
use crate::domain::accounts::Role;
use crate::presentation::dtos::{AccountResponse, LoginResponse};
use crate::shared::error::{ApiErrorObject, ErrorResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tessera Auth API",
        version = "0.1.0",
        description = "Credential and session-issuance service: signed access tokens plus rotating single-use refresh tokens"
    ),
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::refresh,
        crate::presentation::handlers::accounts::profile,
        crate::presentation::handlers::accounts::list_accounts,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            AccountResponse,
            LoginResponse,
            TokenPair,
            Role,
            ErrorResponse,
            ApiErrorObject,
        )
    ),
    tags(
        (name = "auth", description = "Authentication and session endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

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
            )
        }
    }
}
