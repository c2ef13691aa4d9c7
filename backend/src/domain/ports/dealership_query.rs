//! Driving port for dealership and vehicle reads.
//!
//! Inbound adapters call this port with path identifiers and receive domain
//! records ready for projection, or a domain error (`not_found` when either
//! the dealership or the contained vehicle cannot be resolved).

use async_trait::async_trait;

use crate::domain::{Dealership, DealershipId, DealershipVehicle, Error, VehicleId};

/// Use-case port for the inventory read endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealershipQuery: Send + Sync {
    /// All dealerships ordered by name, then identity.
    async fn list_dealerships(&self) -> Result<Vec<Dealership>, Error>;

    /// One dealership, or `not_found`.
    async fn get_dealership(&self, id: DealershipId) -> Result<Dealership, Error>;

    /// Vehicles of one dealership, or `not_found` if the dealership is absent.
    async fn list_vehicles(&self, dealership: DealershipId)
    -> Result<Vec<DealershipVehicle>, Error>;

    /// One vehicle contained by the dealership, or `not_found`.
    async fn get_vehicle(
        &self,
        dealership: DealershipId,
        vehicle: VehicleId,
    ) -> Result<DealershipVehicle, Error>;
}
