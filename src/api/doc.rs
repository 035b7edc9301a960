use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AGENCY_TAG: &str = "Orgaos";
pub const INSPECTION_TAG: &str = "Fiscalizacoes";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fiscalizo",
        description = "Registry of fiscalized agencies and their inspections",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::InspectionStatus,
        )
    ),
    tags(
        (name = AGENCY_TAG, description = "Fiscalized agencies"),
        (name = INSPECTION_TAG, description = "Inspection records"),
        (name = AUTH_TAG, description = "JWT token endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /api/token/"))
                        .build(),
                ),
            )
        }
    }
}
