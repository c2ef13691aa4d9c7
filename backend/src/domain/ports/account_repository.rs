//! Driven port for login account persistence.
//!
//! Username uniqueness is owned by the storage engine. `insert` must report a
//! uniqueness violation as [`AccountRepositoryError::DuplicateUsername`] so
//! callers can treat a lost race like the pre-insert existence check.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Account, AccountId, NewAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "account repository query failed: {message}",
        /// The username is already taken.
        DuplicateUsername { username: String } => "username already exists: {username}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Whether an account with this username exists.
    async fn exists_by_username(&self, username: &Username)
    -> Result<bool, AccountRepositoryError>;

    /// Persist a new account and return it with its assigned identity.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Account with this username, if any.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError>;
}

/// In-memory account store with the same uniqueness rule as the database.
#[derive(Debug, Default)]
pub struct FixtureAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl FixtureAccountRepository {
    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&mut Vec<Account>) -> Result<T, AccountRepositoryError>,
    ) -> Result<T, AccountRepositoryError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| AccountRepositoryError::connection("fixture store poisoned"))?;
        f(&mut guard)
    }
}

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn exists_by_username(
        &self,
        username: &Username,
    ) -> Result<bool, AccountRepositoryError> {
        self.with_accounts(|accounts| Ok(accounts.iter().any(|a| a.username() == username)))
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        self.with_accounts(|accounts| {
            if accounts.iter().any(|a| a.username() == &account.username) {
                return Err(AccountRepositoryError::duplicate_username(
                    account.username.as_ref(),
                ));
            }
            let next_id = i32::try_from(accounts.len() + 1)
                .map_err(|_| AccountRepositoryError::query("account identity overflow"))?;
            let stored = Account::new(AccountId::new(next_id), account.clone());
            accounts.push(stored.clone());
            Ok(stored)
        })
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.with_accounts(|accounts| {
            Ok(accounts.iter().find(|a| a.username() == username).cloned())
        })
    }
}
