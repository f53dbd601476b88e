//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints from the inbound layer (users, modems,
//!   health)
//! - **Schemas**: request/response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.
//!
//! [`ErrorSchema`]: crate::inbound::http::schemas::ErrorSchema
//! [`ErrorCodeSchema`]: crate::inbound::http::schemas::ErrorCodeSchema

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::modems::{DeleteAck, ModemPayload, ModemResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginRequest, PasswordChangeRequest, ProfilePayload, ProfileResponse, RegisterRequest,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Modem vault backend API",
        description = "HTTP interface for session-authenticated access to stored modem credentials."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::change_password,
        crate::inbound::http::modems::list_modems,
        crate::inbound::http::modems::create_modem,
        crate::inbound::http::modems::update_modem,
        crate::inbound::http::modems::delete_modem,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ModemPayload,
        ModemResponse,
        DeleteAck,
        RegisterRequest,
        LoginRequest,
        ProfilePayload,
        PasswordChangeRequest,
        ProfileResponse,
    )),
    tags(
        (name = "users", description = "Account registration, sessions, and profile"),
        (name = "modems", description = "Owner-scoped modem credential records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
