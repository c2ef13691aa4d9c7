//! Builders wiring port implementations into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use concessionnaire_api::domain::ports::{
    AccountRegistration, DealershipQuery, FixtureAccountRepository, FixtureDealershipRepository,
    LoginService,
};
use concessionnaire_api::domain::{AccountService, DealershipQueryService};
use concessionnaire_api::inbound::http::state::{HttpState, HttpStatePorts};
use concessionnaire_api::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselDealershipRepository,
};
use concessionnaire_api::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

type AccountPorts = (Arc<dyn AccountRegistration>, Arc<dyn LoginService>);

fn account_ports<R>(repo: R) -> AccountPorts
where
    R: concessionnaire_api::domain::ports::AccountRepository + 'static,
{
    let service = Arc::new(AccountService::new(
        Arc::new(repo),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    (service.clone(), service)
}

fn inventory_port(pool: Option<&DbPool>) -> Arc<dyn DealershipQuery> {
    match pool {
        Some(pool) => Arc::new(DealershipQueryService::new(Arc::new(
            DieselDealershipRepository::new(pool.clone()),
        ))),
        None => Arc::new(DealershipQueryService::new(Arc::new(
            FixtureDealershipRepository::seeded(),
        ))),
    }
}

/// Build HTTP state from the configured adapters.
///
/// Without a pool every port is backed by an in-memory fixture.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = config.db_pool.as_ref();
    let (registration, login) = match pool {
        Some(pool) => account_ports(DieselAccountRepository::new(pool.clone())),
        None => {
            info!("no database configured; serving in-memory fixtures");
            account_ports(FixtureAccountRepository::default())
        }
    };
    web::Data::new(HttpState::new(HttpStatePorts {
        dealerships: inventory_port(pool),
        registration,
        login,
        tokens: Arc::new(JwtTokenService::new(&config.jwt)),
    }))
}
