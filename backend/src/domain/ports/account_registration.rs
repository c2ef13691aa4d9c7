//! Driving port for public account creation.

use async_trait::async_trait;

use crate::domain::{Account, Error, Registration};

/// Use-case port behind `POST /users/`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistration: Send + Sync {
    /// Create an account, rejecting duplicate usernames with
    /// `invalid_request`.
    async fn register(&self, registration: Registration) -> Result<Account, Error>;
}
