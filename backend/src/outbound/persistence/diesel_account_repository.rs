//! PostgreSQL-backed `AccountRepository` using Diesel.
//!
//! The `accounts.username` unique index is the authority on duplicates; a
//! violation during insert is reported as `DuplicateUsername`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, NewAccount, Username};

use super::diesel_basic_error_mapping::{StoreFailure, classify_diesel_error, pool_error_message};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel implementation of the account persistence port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a repository that checks connections out of `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, username: &Username) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        StoreFailure::Connection(message) => AccountRepositoryError::connection(message),
        StoreFailure::Query(message) => AccountRepositoryError::query(message),
        StoreFailure::UniqueViolation => {
            AccountRepositoryError::duplicate_username(username.as_ref())
        }
    }
}

fn to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let id = row.id;
    Account::try_from(row).map_err(|err| {
        warn!(id, error = %err, "stored account failed validation");
        AccountRepositoryError::query("invalid account row")
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn exists_by_username(
        &self,
        username: &Username,
    ) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::username.eq(username.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, username))
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AccountRow = diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &account.username))?;

        to_account(row)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, username))?;

        row.map(to_account).transpose()
    }
}
