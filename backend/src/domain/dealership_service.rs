//! Inventory read service.
//!
//! Implements [`DealershipQuery`] over a [`DealershipRepository`]. A vehicle
//! is only reachable through the dealership that owns it: the dealership is
//! resolved first, then the vehicle is looked up with both identifiers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{DealershipQuery, DealershipRepository, DealershipRepositoryError};
use crate::domain::{Dealership, DealershipId, DealershipVehicle, Error, VehicleId, sort_vehicles};

const DEALERSHIP_NOT_FOUND: &str = "dealership not found";
const VEHICLE_NOT_FOUND: &str = "vehicle not found";

/// Inventory service implementing the read-side driving port.
#[derive(Clone)]
pub struct DealershipQueryService<R> {
    repo: Arc<R>,
}

impl<R> DealershipQueryService<R> {
    /// Create a new service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> DealershipQueryService<R>
where
    R: DealershipRepository,
{
    fn map_repository_error(error: DealershipRepositoryError) -> Error {
        match error {
            DealershipRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("inventory store unavailable: {message}"))
            }
            DealershipRepositoryError::Query { message } => {
                Error::internal(format!("inventory store error: {message}"))
            }
        }
    }

    async fn require_dealership(&self, id: DealershipId) -> Result<Dealership, Error> {
        self.repo
            .find_dealership(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(DEALERSHIP_NOT_FOUND))
    }
}

#[async_trait]
impl<R> DealershipQuery for DealershipQueryService<R>
where
    R: DealershipRepository,
{
    async fn list_dealerships(&self) -> Result<Vec<Dealership>, Error> {
        let mut dealerships = self
            .repo
            .list_dealerships()
            .await
            .map_err(Self::map_repository_error)?;
        dealerships.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(dealerships)
    }

    async fn get_dealership(&self, id: DealershipId) -> Result<Dealership, Error> {
        self.require_dealership(id).await
    }

    async fn list_vehicles(
        &self,
        dealership: DealershipId,
    ) -> Result<Vec<DealershipVehicle>, Error> {
        let owner = self.require_dealership(dealership).await?;
        let mut vehicles = self
            .repo
            .list_vehicles(owner.id())
            .await
            .map_err(Self::map_repository_error)?;
        sort_vehicles(&mut vehicles);

        Ok(vehicles
            .into_iter()
            .filter(|vehicle| vehicle.dealership_id() == owner.id())
            .map(|vehicle| DealershipVehicle::new(vehicle, owner.name().clone()))
            .collect())
    }

    async fn get_vehicle(
        &self,
        dealership: DealershipId,
        vehicle: VehicleId,
    ) -> Result<DealershipVehicle, Error> {
        let owner = self.require_dealership(dealership).await?;
        let found = self
            .repo
            .find_vehicle(owner.id(), vehicle)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(VEHICLE_NOT_FOUND))?;
        Ok(DealershipVehicle::new(found, owner.name().clone()))
    }
}

#[cfg(test)]
#[path = "dealership_service_tests.rs"]
mod tests;
