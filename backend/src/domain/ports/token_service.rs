//! Driven port for bearer credential issuance and verification.

use crate::domain::{Account, AccountId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signature, structure or claims are invalid.
        Invalid => "token is invalid",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// A token of the other kind was presented.
        WrongKind { expected: String } => "expected a {expected} token",
        /// Signing failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Access and refresh tokens issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Identity proven by a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub id: AccountId,
    pub username: Username,
}

/// Signed token issuance and verification.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a fresh access/refresh pair for `account`.
    fn issue(&self, account: &Account) -> Result<TokenPair, TokenError>;

    /// Exchange a refresh token for a new access token.
    fn refresh(&self, refresh_token: &str) -> Result<String, TokenError>;

    /// Verify an access token and return the identity it carries.
    fn verify_access(&self, access_token: &str) -> Result<AuthenticatedAccount, TokenError>;
}
