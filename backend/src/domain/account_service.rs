//! Account registration and credential checks.
//!
//! [`AccountService`] implements both account-facing driving ports. Password
//! hashing and verification run on the blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountRegistration, AccountRepository, AccountRepositoryError, LoginService, PasswordHasher,
    PasswordHasherError,
};
use crate::domain::{
    Account, Error, LoginCredentials, NewAccount, PasswordHash, Registration, TraceId, Username,
};

/// Message returned when a username is taken.
pub const DUPLICATE_USERNAME_MESSAGE: &str = "a user with this username already exists";
/// Message returned for any failed credential check.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "no active account found with the given credentials";

/// Account use-cases over a repository and a password hasher.
#[derive(Clone)]
pub struct AccountService<R, H> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AccountService<R, H> {
    /// Create a new service with the given collaborators.
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }
}

impl<R, H> AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher + 'static,
{
    fn creation_failure(detail: impl std::fmt::Display) -> Error {
        error!(
            trace_id = ?TraceId::current().map(|id| id.to_string()),
            detail = %detail,
            "account creation failed"
        );
        Error::invalid_request(format!("failed to create user: {detail}"))
    }

    fn map_login_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account store unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account store error: {message}"))
            }
            AccountRepositoryError::DuplicateUsername { .. } => {
                Error::internal("unexpected username conflict during login")
            }
        }
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(Self::creation_failure)?
            .map_err(Self::creation_failure)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification aborted: {err}")))?
            .map_err(|err: PasswordHasherError| {
                Error::internal(format!("password verification failed: {err}"))
            })
    }
}

#[async_trait]
impl<R, H> AccountRegistration for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        let taken = self
            .repo
            .exists_by_username(registration.username())
            .await
            .map_err(Self::creation_failure)?;
        if taken {
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }

        let password_hash = self.hash_password(registration.password()).await?;
        let account = NewAccount {
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
        };

        match self.repo.insert(&account).await {
            Ok(stored) => Ok(stored),
            Err(AccountRepositoryError::DuplicateUsername { .. }) => {
                Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE))
            }
            Err(err) => Err(Self::creation_failure(err)),
        }
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let Some(account) = self
            .repo
            .find_by_username(&username)
            .await
            .map_err(Self::map_login_repository_error)?
        else {
            debug!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .verify_password(credentials.password(), account.password_hash().clone())
            .await?;
        if !matches {
            debug!(account_id = %account.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }
        Ok(account)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
