//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountRegistration, DealershipQuery, LoginService, TokenService};

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub dealerships: Arc<dyn DealershipQuery>,
    pub registration: Arc<dyn AccountRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dealerships: Arc<dyn DealershipQuery>,
    pub registration: Arc<dyn AccountRegistration>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use concessionnaire_api::domain::ports::{
    ///     FixtureAccountRepository, FixtureDealershipRepository,
    /// };
    /// use concessionnaire_api::domain::{AccountService, DealershipQueryService};
    /// use concessionnaire_api::inbound::http::state::{HttpState, HttpStatePorts};
    /// use concessionnaire_api::outbound::security::{
    ///     Argon2PasswordHasher, JwtSettings, JwtTokenService,
    /// };
    ///
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(FixtureAccountRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     dealerships: Arc::new(DealershipQueryService::new(Arc::new(
    ///         FixtureDealershipRepository::seeded(),
    ///     ))),
    ///     registration: accounts.clone(),
    ///     login: accounts,
    ///     tokens: Arc::new(JwtTokenService::new(&JwtSettings::new("secret", 300, 86_400))),
    /// });
    /// let _dealerships = state.dealerships.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            dealerships,
            registration,
            login,
            tokens,
        } = ports;
        Self {
            dealerships,
            registration,
            login,
            tokens,
        }
    }
}
