//! Driven port for dealership and vehicle storage.
//!
//! Vehicle lookups are always scoped by the owning dealership. Adapters must
//! resolve `find_vehicle` with a single predicate on both identifiers so a
//! vehicle held by another dealership is indistinguishable from a missing one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    Dealership, DealershipId, DealershipName, RegistrationNumber, Vehicle, VehicleDraft, VehicleId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by dealership repository adapters.
    pub enum DealershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "dealership repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "dealership repository query failed: {message}",
    }
}

/// Read access to dealerships and the vehicles they own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealershipRepository: Send + Sync {
    /// Every dealership, ordered by name then identity.
    async fn list_dealerships(&self) -> Result<Vec<Dealership>, DealershipRepositoryError>;

    /// Dealership with the given identity, if any.
    async fn find_dealership(
        &self,
        id: DealershipId,
    ) -> Result<Option<Dealership>, DealershipRepositoryError>;

    /// Vehicles owned by `dealership`, ordered by make, category then identity.
    async fn list_vehicles(
        &self,
        dealership: DealershipId,
    ) -> Result<Vec<Vehicle>, DealershipRepositoryError>;

    /// Vehicle matching both `vehicle` and `dealership`.
    async fn find_vehicle(
        &self,
        dealership: DealershipId,
        vehicle: VehicleId,
    ) -> Result<Option<Vehicle>, DealershipRepositoryError>;
}

/// In-memory repository used when no database is configured and in tests.
///
/// # Examples
/// ```
/// # use concessionnaire_api::domain::ports::{DealershipRepository, FixtureDealershipRepository};
/// # use concessionnaire_api::domain::{DealershipId, VehicleId};
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = FixtureDealershipRepository::default();
/// let other = repo
///     .find_vehicle(DealershipId::new(2), VehicleId::new(1))
///     .await
///     .unwrap();
/// assert!(other.is_none());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct FixtureDealershipRepository {
    dealerships: Arc<Vec<Dealership>>,
    vehicles: Arc<Vec<Vehicle>>,
}

impl FixtureDealershipRepository {
    /// Build a repository over the supplied records.
    pub fn new(dealerships: Vec<Dealership>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            dealerships: Arc::new(dealerships),
            vehicles: Arc::new(vehicles),
        }
    }

    /// Repository seeded with two dealerships and one vehicle each.
    ///
    /// Falls back to an empty repository if the seed values ever stop
    /// validating.
    pub fn seeded() -> Self {
        fixture_records()
            .map(|(dealerships, vehicles)| Self::new(dealerships, vehicles))
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "fixture inventory failed validation");
                Self::new(Vec::new(), Vec::new())
            })
    }
}

impl Default for FixtureDealershipRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

type FixtureRecords = (Vec<Dealership>, Vec<Vehicle>);

fn fixture_records() -> Result<FixtureRecords, Box<dyn std::error::Error>> {
    let dealerships = vec![
        Dealership::new(
            DealershipId::new(1),
            DealershipName::new("AutoPlus Paris")?,
            RegistrationNumber::new("12345678900011")?,
        ),
        Dealership::new(
            DealershipId::new(2),
            DealershipName::new("Moto Lyon")?,
            RegistrationNumber::new("98765432100017")?,
        ),
    ];
    let vehicles = vec![
        Vehicle::try_from(VehicleDraft {
            id: 1,
            category: "auto".to_owned(),
            make: "Peugeot".to_owned(),
            horsepower: 120,
            pre_tax_price: 25_000.0,
            dealership_id: 1,
        })?,
        Vehicle::try_from(VehicleDraft {
            id: 2,
            category: "moto".to_owned(),
            make: "Yamaha".to_owned(),
            horsepower: 70,
            pre_tax_price: 8_990.0,
            dealership_id: 2,
        })?,
    ];
    Ok((dealerships, vehicles))
}

#[async_trait]
impl DealershipRepository for FixtureDealershipRepository {
    async fn list_dealerships(&self) -> Result<Vec<Dealership>, DealershipRepositoryError> {
        let mut dealerships = self.dealerships.as_ref().clone();
        dealerships.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(dealerships)
    }

    async fn find_dealership(
        &self,
        id: DealershipId,
    ) -> Result<Option<Dealership>, DealershipRepositoryError> {
        Ok(self.dealerships.iter().find(|d| d.id() == id).cloned())
    }

    async fn list_vehicles(
        &self,
        dealership: DealershipId,
    ) -> Result<Vec<Vehicle>, DealershipRepositoryError> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.dealership_id() == dealership)
            .cloned()
            .collect();
        crate::domain::sort_vehicles(&mut vehicles);
        Ok(vehicles)
    }

    async fn find_vehicle(
        &self,
        dealership: DealershipId,
        vehicle: VehicleId,
    ) -> Result<Option<Vehicle>, DealershipRepositoryError> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.id() == vehicle && v.dealership_id() == dealership)
            .cloned())
    }
}
