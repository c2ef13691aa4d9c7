//! PostgreSQL-backed `DealershipRepository` using Diesel.
//!
//! Vehicle lookups filter on `id AND dealership_id` in one statement; the
//! adapter never loads a vehicle by id alone.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{DealershipRepository, DealershipRepositoryError};
use crate::domain::{Dealership, DealershipId, Vehicle, VehicleId};

use super::diesel_basic_error_mapping::{StoreFailure, classify_diesel_error, pool_error_message};
use super::models::{DealershipRow, VehicleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{dealerships, vehicles};

/// Diesel implementation of the inventory read port.
#[derive(Clone)]
pub struct DieselDealershipRepository {
    pool: DbPool,
}

impl DieselDealershipRepository {
    /// Create a repository that checks connections out of `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DealershipRepositoryError {
    DealershipRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DealershipRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => DealershipRepositoryError::connection(message),
        StoreFailure::Query(message) => DealershipRepositoryError::query(message),
        StoreFailure::UniqueViolation => DealershipRepositoryError::query("database error"),
    }
}

fn invalid_row(
    kind: &'static str,
    id: i32,
    err: impl std::fmt::Display,
) -> DealershipRepositoryError {
    warn!(kind, id, error = %err, "stored row failed validation");
    DealershipRepositoryError::query(format!("invalid {kind} row"))
}

fn to_dealership(row: DealershipRow) -> Result<Dealership, DealershipRepositoryError> {
    let id = row.id;
    Dealership::try_from(row).map_err(|err| invalid_row("dealership", id, err))
}

fn to_vehicle(row: VehicleRow) -> Result<Vehicle, DealershipRepositoryError> {
    let id = row.id;
    Vehicle::try_from(row).map_err(|err| invalid_row("vehicle", id, err))
}

#[async_trait]
impl DealershipRepository for DieselDealershipRepository {
    async fn list_dealerships(&self) -> Result<Vec<Dealership>, DealershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DealershipRow> = dealerships::table
            .select(DealershipRow::as_select())
            .order((dealerships::name.asc(), dealerships::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(to_dealership).collect()
    }

    async fn find_dealership(
        &self,
        id: DealershipId,
    ) -> Result<Option<Dealership>, DealershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DealershipRow> = dealerships::table
            .filter(dealerships::id.eq(id.get()))
            .select(DealershipRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_dealership).transpose()
    }

    async fn list_vehicles(
        &self,
        dealership: DealershipId,
    ) -> Result<Vec<Vehicle>, DealershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VehicleRow> = vehicles::table
            .filter(vehicles::dealership_id.eq(dealership.get()))
            .select(VehicleRow::as_select())
            .order((
                vehicles::make.asc(),
                vehicles::category.asc(),
                vehicles::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(to_vehicle).collect()
    }

    async fn find_vehicle(
        &self,
        dealership: DealershipId,
        vehicle: VehicleId,
    ) -> Result<Option<Vehicle>, DealershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<VehicleRow> = vehicles::table
            .filter(
                vehicles::id
                    .eq(vehicle.get())
                    .and(vehicles::dealership_id.eq(dealership.get())),
            )
            .select(VehicleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_vehicle).transpose()
    }
}
