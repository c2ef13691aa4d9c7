//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters. Driving ports ([`DealershipQuery`],
//! [`AccountRegistration`], [`LoginService`]) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_registration;
mod account_repository;
mod dealership_query;
mod dealership_repository;
mod login_service;
mod password_hasher;
mod token_service;

#[cfg(test)]
pub use account_registration::MockAccountRegistration;
pub use account_registration::AccountRegistration;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError, FixtureAccountRepository};
#[cfg(test)]
pub use dealership_query::MockDealershipQuery;
pub use dealership_query::DealershipQuery;
#[cfg(test)]
pub use dealership_repository::MockDealershipRepository;
pub use dealership_repository::{
    DealershipRepository, DealershipRepositoryError, FixtureDealershipRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{AuthenticatedAccount, TokenError, TokenPair, TokenService};
