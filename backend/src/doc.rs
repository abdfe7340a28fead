//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path, the wire schemas they use,
//! and the session cookie security scheme. Swagger UI serves it in debug
//! builds; `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::completions::{CompletionResponse, ToggleCompletionResponse};
use crate::inbound::http::habits::{
    CreateHabitResponse, EditModeResponse, HabitRequestBody, HabitResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CurrentUserResponse, LoginRequest};

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
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit tracker API",
        description = "Per-user habits with weekly targets and daily completion history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::update_habit,
        crate::inbound::http::habits::toggle_edit_mode,
        crate::inbound::http::habits::delete_habit,
        crate::inbound::http::completions::toggle_completion,
        crate::inbound::http::completions::list_completions,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        CurrentUserResponse,
        HabitRequestBody,
        HabitResponse,
        CreateHabitResponse,
        EditModeResponse,
        ToggleCompletionResponse,
        CompletionResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "habits", description = "Create, edit, and delete habits"),
        (name = "completions", description = "Daily completion toggles and history"),
        (name = "users", description = "Login and session identity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
