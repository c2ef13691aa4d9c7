//! Driving port for credential checks.
//!
//! The token endpoint calls this port to turn a username/password pair into
//! an account without knowing how accounts or hashes are stored.

use async_trait::async_trait;

use crate::domain::{Account, Error, LoginCredentials};

/// Use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `unauthorized`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error>;
}
