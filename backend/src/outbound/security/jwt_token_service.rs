//! HS256 JWT implementation of the `TokenService` port.
//!
//! Access and refresh tokens share one signing secret and are told apart by
//! the `token_type` claim. Expiry is checked by `jsonwebtoken` with no
//! leeway. Lifetimes that would overflow the clock fail signing instead of
//! panicking.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{AuthenticatedAccount, TokenError, TokenPair, TokenService};
use crate::domain::{Account, AccountId, Username};

/// Kind of token carried in the `token_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identity.
    pub sub: String,
    pub username: String,
    pub token_type: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Longest token lifetime the settings layer accepts (ten years).
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 86_400;

/// Signing secret plus token lifetimes in seconds.
#[derive(Clone)]
pub struct JwtSettings {
    secret: Zeroizing<Vec<u8>>,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtSettings {
    pub fn new(secret: impl AsRef<[u8]>, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .finish()
    }
}

fn expiry(issued_at: DateTime<Utc>, ttl_secs: u64) -> Result<DateTime<Utc>, TokenError> {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .ok_or_else(|| {
            TokenError::signing(format!("token lifetime of {ttl_secs}s is out of range"))
        })
}

/// `TokenService` backed by `jsonwebtoken`.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: u64,
    refresh_ttl_secs: u64,
}

impl JwtTokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(&settings.secret),
            decoding: DecodingKey::from_secret(&settings.secret),
            validation,
            access_ttl_secs: settings.access_ttl_secs,
            refresh_ttl_secs: settings.refresh_ttl_secs,
        }
    }

    fn sign(
        &self,
        id: AccountId,
        username: &str,
        kind: TokenKind,
        ttl_secs: u64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        self.sign_until(id, username, kind, now, expiry(now, ttl_secs)?)
    }

    fn sign_until(
        &self,
        id: AccountId,
        username: &str,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: id.to_string(),
            username: username.to_owned(),
            token_type: kind,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn decode_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(),
            }
        })?;
        if data.claims.token_type != expected {
            return Err(TokenError::wrong_kind(expected.as_str()));
        }
        Ok(data.claims)
    }
}

fn identity(claims: &Claims) -> Result<(AccountId, Username), TokenError> {
    let id = claims.sub.parse::<i32>().map_err(|_| TokenError::invalid())?;
    let username = Username::new(&claims.username).map_err(|_| TokenError::invalid())?;
    Ok((AccountId::new(id), username))
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: &Account) -> Result<TokenPair, TokenError> {
        let username = account.username().as_ref();
        Ok(TokenPair {
            access: self.sign(account.id(), username, TokenKind::Access, self.access_ttl_secs)?,
            refresh: self.sign(
                account.id(),
                username,
                TokenKind::Refresh,
                self.refresh_ttl_secs,
            )?,
        })
    }

    fn refresh(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.decode_kind(refresh_token, TokenKind::Refresh)?;
        let (id, username) = identity(&claims)?;
        self.sign(id, username.as_ref(), TokenKind::Access, self.access_ttl_secs)
    }

    fn verify_access(&self, access_token: &str) -> Result<AuthenticatedAccount, TokenError> {
        let claims = self.decode_kind(access_token, TokenKind::Access)?;
        let (id, username) = identity(&claims)?;
        Ok(AuthenticatedAccount { id, username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, NewAccount, PasswordHash};
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"test-secret-with-enough-entropy";

    #[fixture]
    fn service() -> JwtTokenService {
        JwtTokenService::new(&JwtSettings::new(SECRET, 300, 86_400))
    }

    #[fixture]
    fn account() -> Account {
        Account::new(
            AccountId::new(42),
            NewAccount {
                username: Username::new("john_doe").expect("username"),
                email: Email::new("john@example.com").expect("email"),
                password_hash: PasswordHash::new("$argon2id$fixture").expect("hash"),
            },
        )
    }

    #[rstest]
    fn issued_access_token_verifies(service: JwtTokenService, account: Account) {
        let pair = service.issue(&account).expect("issue");
        let identity = service.verify_access(&pair.access).expect("verify");
        assert_eq!(identity.id, AccountId::new(42));
        assert_eq!(identity.username.as_ref(), "john_doe");
    }

    #[rstest]
    fn refresh_token_is_not_an_access_token(service: JwtTokenService, account: Account) {
        let pair = service.issue(&account).expect("issue");
        assert_eq!(
            service.verify_access(&pair.refresh),
            Err(TokenError::wrong_kind("access"))
        );
    }

    #[rstest]
    fn refresh_yields_a_fresh_access_token(service: JwtTokenService, account: Account) {
        let pair = service.issue(&account).expect("issue");
        let access = service.refresh(&pair.refresh).expect("refresh");
        assert!(service.verify_access(&access).is_ok());
        assert_eq!(
            service.refresh(&pair.access),
            Err(TokenError::wrong_kind("refresh"))
        );
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid(service: JwtTokenService, account: Account) {
        let other = JwtTokenService::new(&JwtSettings::new(b"another-secret", 300, 86_400));
        let pair = other.issue(&account).expect("issue");
        assert_eq!(service.verify_access(&pair.access), Err(TokenError::invalid()));
    }

    #[rstest]
    fn expired_tokens_are_rejected(service: JwtTokenService, account: Account) {
        let issued_at = Utc::now() - Duration::seconds(120);
        let token = service
            .sign_until(
                account.id(),
                "john_doe",
                TokenKind::Access,
                issued_at,
                issued_at + Duration::seconds(60),
            )
            .expect("sign");
        assert_eq!(service.verify_access(&token), Err(TokenError::expired()));
    }

    #[rstest]
    #[case(10_000_000_000_000, 60)]
    #[case(60, u64::MAX)]
    fn unrepresentable_lifetimes_fail_signing(
        account: Account,
        #[case] access_ttl_secs: u64,
        #[case] refresh_ttl_secs: u64,
    ) {
        let service = JwtTokenService::new(&JwtSettings::new(
            SECRET,
            access_ttl_secs,
            refresh_ttl_secs,
        ));
        let err = service.issue(&account).expect_err("lifetime overflows");
        assert!(matches!(err, TokenError::Signing { .. }));
    }

    #[rstest]
    fn the_longest_accepted_lifetime_still_signs(account: Account) {
        let service = JwtTokenService::new(&JwtSettings::new(
            SECRET,
            MAX_TOKEN_TTL_SECS,
            MAX_TOKEN_TTL_SECS,
        ));
        let pair = service.issue(&account).expect("issue");
        assert!(service.verify_access(&pair.access).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(service: JwtTokenService, #[case] token: &str) {
        assert_eq!(service.verify_access(token), Err(TokenError::invalid()));
    }

    #[rstest]
    fn settings_debug_hides_secret() {
        let rendered = format!("{:?}", JwtSettings::new(SECRET, 1, 2));
        assert!(!rendered.contains("entropy"));
    }
}
