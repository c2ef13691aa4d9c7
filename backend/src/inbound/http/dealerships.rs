//! Dealership and vehicle read handlers.
//!
//! ```text
//! GET /api/concessionnaires/
//! GET /api/concessionnaires/{id}/
//! GET /api/concessionnaires/{id}/vehicules/
//! GET /api/concessionnaires/{id}/vehicules/{vehicule_id}/
//! ```
//!
//! Every handler takes [`Authenticated`] first, so anonymous requests are
//! rejected before any port is called.

use actix_web::{get, web};

use crate::domain::{DealershipId, VehicleId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::projection::{DealershipView, VehicleDetailView, VehicleSummaryView};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every dealership ordered by name.
#[utoipa::path(
    get,
    path = "/api/concessionnaires/",
    responses(
        (status = 200, description = "Dealerships", body = [DealershipView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["concessionnaires"],
    operation_id = "listDealerships",
    security(("BearerAuth" = []))
)]
#[get("/concessionnaires/")]
pub async fn list_dealerships(
    _auth: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DealershipView>>> {
    let dealerships = state.dealerships.list_dealerships().await?;
    Ok(web::Json(dealerships.iter().map(DealershipView::from).collect()))
}

/// Fetch one dealership.
#[utoipa::path(
    get,
    path = "/api/concessionnaires/{id}/",
    params(("id" = i32, Path, description = "Dealership identifier")),
    responses(
        (status = 200, description = "Dealership", body = DealershipView),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["concessionnaires"],
    operation_id = "getDealership",
    security(("BearerAuth" = []))
)]
#[get("/concessionnaires/{id}/")]
pub async fn get_dealership(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DealershipView>> {
    let id = DealershipId::new(path.into_inner());
    let dealership = state.dealerships.get_dealership(id).await?;
    Ok(web::Json(DealershipView::from(&dealership)))
}

/// List the vehicles held by one dealership.
#[utoipa::path(
    get,
    path = "/api/concessionnaires/{id}/vehicules/",
    params(("id" = i32, Path, description = "Dealership identifier")),
    responses(
        (status = 200, description = "Vehicles of the dealership", body = [VehicleSummaryView]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Dealership not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicules"],
    operation_id = "listDealershipVehicles",
    security(("BearerAuth" = []))
)]
#[get("/concessionnaires/{id}/vehicules/")]
pub async fn list_vehicles(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Vec<VehicleSummaryView>>> {
    let id = DealershipId::new(path.into_inner());
    let vehicles = state.dealerships.list_vehicles(id).await?;
    Ok(web::Json(vehicles.iter().map(VehicleSummaryView::from).collect()))
}

/// Fetch one vehicle through the dealership that holds it.
///
/// A vehicle held by another dealership is reported exactly like a missing
/// one.
#[utoipa::path(
    get,
    path = "/api/concessionnaires/{id}/vehicules/{vehicule_id}/",
    params(
        ("id" = i32, Path, description = "Dealership identifier"),
        ("vehicule_id" = i32, Path, description = "Vehicle identifier")
    ),
    responses(
        (status = 200, description = "Vehicle", body = VehicleDetailView),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Dealership or vehicle not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicules"],
    operation_id = "getDealershipVehicle",
    security(("BearerAuth" = []))
)]
#[get("/concessionnaires/{id}/vehicules/{vehicule_id}/")]
pub async fn get_vehicle(
    _auth: Authenticated,
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
) -> ApiResult<web::Json<VehicleDetailView>> {
    let (dealership, vehicle) = path.into_inner();
    let record = state
        .dealerships
        .get_vehicle(DealershipId::new(dealership), VehicleId::new(vehicle))
        .await?;
    Ok(web::Json(VehicleDetailView::from(&record)))
}
