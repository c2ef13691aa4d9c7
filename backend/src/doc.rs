//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every inventory, account and token endpoint plus the
//! health probes, the projection schemas, and a Bearer JWT security scheme.
//! The document is served at `/api/schema/`, rendered by Swagger UI in debug
//! builds, and printed by the `openapi-dump` binary.

use actix_web::{HttpResponse, get};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::projection::{DealershipView, VehicleDetailView, VehicleSummaryView};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tokens::{
    AccessTokenResponse, RefreshRequest, TokenPairResponse, TokenRequest,
};
use crate::inbound::http::users::{CreateUserRequest, CreateUserResponse};

/// Name of the security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "BearerAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Access token issued by POST /api/token/."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Concessionnaire API",
        description = "Authenticated read access to dealerships and their vehicles, plus account creation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::tokens::obtain_token_pair,
        crate::inbound::http::tokens::refresh_access_token,
        crate::inbound::http::dealerships::list_dealerships,
        crate::inbound::http::dealerships::get_dealership,
        crate::inbound::http::dealerships::list_vehicles,
        crate::inbound::http::dealerships::get_vehicle,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DealershipView,
        VehicleSummaryView,
        VehicleDetailView,
        CreateUserRequest,
        CreateUserResponse,
        TokenRequest,
        TokenPairResponse,
        RefreshRequest,
        AccessTokenResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "concessionnaires", description = "Dealership reads"),
        (name = "vehicules", description = "Vehicles held by a dealership"),
        (name = "users", description = "Account creation"),
        (name = "tokens", description = "Bearer credential issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
#[get("/schema/")]
pub async fn openapi_schema() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
