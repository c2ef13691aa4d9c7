//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    AccountRegistration, DealershipQuery, FixtureAccountRepository, FixtureDealershipRepository,
    LoginService, TokenService,
};
use crate::domain::{
    Account, AccountId, AccountService, DealershipQueryService, Email, NewAccount, PasswordHash,
    Username,
};
use crate::outbound::security::{Argon2PasswordHasher, JwtSettings, JwtTokenService};

use super::state::{HttpState, HttpStatePorts};

const TEST_JWT_SECRET: &[u8] = b"inbound-http-test-secret";

/// Token service signing with a fixed test secret.
pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(&JwtSettings::new(TEST_JWT_SECRET, 300, 86_400))
}

/// Account used to mint bearer tokens in handler tests.
pub fn test_account() -> Account {
    Account::new(
        AccountId::new(1),
        NewAccount {
            username: Username::new("john_doe").expect("username"),
            email: Email::new("john@example.com").expect("email"),
            password_hash: PasswordHash::new("$argon2id$fixture").expect("hash"),
        },
    )
}

/// `Authorization` header value carrying a valid access token.
pub fn bearer_header() -> String {
    let pair = test_token_service()
        .issue(&test_account())
        .expect("issue test token");
    format!("Bearer {}", pair.access)
}

fn account_service() -> Arc<AccountService<FixtureAccountRepository, Argon2PasswordHasher>> {
    Arc::new(AccountService::new(
        Arc::new(FixtureAccountRepository::default()),
        Arc::new(Argon2PasswordHasher::new()),
    ))
}

fn state(
    dealerships: Arc<dyn DealershipQuery>,
    registration: Option<Arc<dyn AccountRegistration>>,
    login: Option<Arc<dyn LoginService>>,
    tokens: Arc<dyn TokenService>,
) -> HttpState {
    let accounts = account_service();
    HttpState::new(HttpStatePorts {
        dealerships,
        registration: registration.unwrap_or_else(|| accounts.clone()),
        login: login.unwrap_or(accounts),
        tokens,
    })
}

/// State over the seeded inventory, an empty account store and the test
/// token service.
pub fn fixture_state() -> HttpState {
    state(
        Arc::new(DealershipQueryService::new(Arc::new(
            FixtureDealershipRepository::seeded(),
        ))),
        None,
        None,
        Arc::new(test_token_service()),
    )
}

/// Fixture state with a custom inventory query port.
pub fn state_with_dealerships(dealerships: Arc<dyn DealershipQuery>) -> HttpState {
    state(dealerships, None, None, Arc::new(test_token_service()))
}

/// Fixture state with a custom token service.
pub fn state_with_tokens(tokens: Arc<dyn TokenService>) -> HttpState {
    let dealerships = Arc::new(DealershipQueryService::new(Arc::new(
        FixtureDealershipRepository::seeded(),
    )));
    state(dealerships, None, None, tokens)
}

/// Fixture state with custom account ports.
pub fn state_with_accounts(
    registration: Arc<dyn AccountRegistration>,
    login: Arc<dyn LoginService>,
) -> HttpState {
    let dealerships = Arc::new(DealershipQueryService::new(Arc::new(
        FixtureDealershipRepository::seeded(),
    )));
    state(
        dealerships,
        Some(registration),
        Some(login),
        Arc::new(test_token_service()),
    )
}
