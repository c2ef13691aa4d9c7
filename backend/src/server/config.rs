//! Server settings loaded via OrthoConfig and the runtime configuration
//! derived from them.

use std::fmt;
use std::net::SocketAddr;

use concessionnaire_api::outbound::persistence::{DbPool, PoolConfig};
use concessionnaire_api::outbound::security::{JwtSettings, MAX_TOKEN_TTL_SECS};
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ACCESS_TTL_SECS: u64 = 300;
const DEFAULT_REFRESH_TTL_SECS: u64 = 86_400;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Build mode used when a setting has a development-only fallback.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("CONCESSIONNAIRE_JWT_SECRET is required in release builds")]
    MissingJwtSecret,
    #[error("{setting} must be between 1 and {max} seconds, got {value}")]
    TokenLifetimeOutOfRange {
        setting: &'static str,
        value: u64,
        max: u64,
    },
}

fn bounded_ttl(setting: &'static str, value: u64) -> Result<u64, ConfigError> {
    if (1..=MAX_TOKEN_TTL_SECS).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::TokenLifetimeOutOfRange {
            setting,
            value,
            max: MAX_TOKEN_TTL_SECS,
        })
    }
}

/// Raw settings from the environment, CLI flags and config file.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONCESSIONNAIRE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server runs on in-memory fixtures.
    pub database_url: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    pub access_token_ttl_secs: Option<u64>,
    pub refresh_token_ttl_secs: Option<u64>,
    pub db_max_connections: Option<u32>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("run_migrations", &self.run_migrations)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("access_token_ttl_secs", &self.access_token_ttl_secs)
            .field("refresh_token_ttl_secs", &self.refresh_token_ttl_secs)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn access_token_ttl_secs(&self) -> u64 {
        self.access_token_ttl_secs.unwrap_or(DEFAULT_ACCESS_TTL_SECS)
    }

    pub fn refresh_token_ttl_secs(&self) -> u64 {
        self.refresh_token_ttl_secs
            .unwrap_or(DEFAULT_REFRESH_TTL_SECS)
    }

    /// Pool settings, when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.as_str())
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
        })
    }

    /// Token settings. Debug builds without a secret get a random one that
    /// lives as long as the process.
    pub fn jwt_settings(&self, mode: BuildMode) -> Result<JwtSettings, ConfigError> {
        let access_ttl_secs =
            bounded_ttl("access_token_ttl_secs", self.access_token_ttl_secs())?;
        let refresh_ttl_secs =
            bounded_ttl("refresh_token_ttl_secs", self.refresh_token_ttl_secs())?;
        let secret = match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Zeroizing::new(secret.as_bytes().to_vec()),
            None if mode == BuildMode::Debug => {
                warn!("no JWT secret configured; using an ephemeral secret (dev only)");
                let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(bytes.as_mut_slice());
                bytes
            }
            None => return Err(ConfigError::MissingJwtSecret),
        };
        Ok(JwtSettings::new(
            secret.as_slice(),
            access_ttl_secs,
            refresh_ttl_secs,
        ))
    }
}

/// Runtime configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt: JwtSettings,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    pub fn new(bind_addr: SocketAddr, jwt: JwtSettings) -> Self {
        Self {
            bind_addr,
            jwt,
            db_pool: None,
        }
    }

    /// Use Diesel-backed adapters instead of the in-memory fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "CONCESSIONNAIRE_BIND_ADDR",
        "CONCESSIONNAIRE_DATABASE_URL",
        "CONCESSIONNAIRE_RUN_MIGRATIONS",
        "CONCESSIONNAIRE_JWT_SECRET",
        "CONCESSIONNAIRE_ACCESS_TOKEN_TTL_SECS",
        "CONCESSIONNAIRE_REFRESH_TOKEN_TTL_SECS",
        "CONCESSIONNAIRE_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("concessionnaire-api")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(!settings.run_migrations);
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.access_token_ttl_secs(), 300);
        assert_eq!(settings.refresh_token_ttl_secs(), 86_400);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| {
            !matches!(
                *name,
                "CONCESSIONNAIRE_BIND_ADDR"
                    | "CONCESSIONNAIRE_DATABASE_URL"
                    | "CONCESSIONNAIRE_RUN_MIGRATIONS"
                    | "CONCESSIONNAIRE_DB_MAX_CONNECTIONS"
            )
        });
        vars.extend([
            ("CONCESSIONNAIRE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "CONCESSIONNAIRE_DATABASE_URL",
                Some("postgres://localhost/concessionnaire".to_owned()),
            ),
            ("CONCESSIONNAIRE_RUN_MIGRATIONS", Some("true".to_owned())),
            ("CONCESSIONNAIRE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("addr"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.run_migrations);
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://localhost/concessionnaire");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    fn release_builds_require_a_jwt_secret() {
        let _guard = lock_env(cleared());
        let settings = load_from_empty_args();

        assert!(matches!(
            settings.jwt_settings(BuildMode::Release),
            Err(ConfigError::MissingJwtSecret)
        ));
        assert!(settings.jwt_settings(BuildMode::Debug).is_ok());
    }

    #[rstest]
    #[case("CONCESSIONNAIRE_ACCESS_TOKEN_TTL_SECS", "10000000000000", "access_token_ttl_secs")]
    #[case("CONCESSIONNAIRE_REFRESH_TOKEN_TTL_SECS", "0", "refresh_token_ttl_secs")]
    fn token_lifetimes_outside_the_accepted_range_are_rejected(
        #[case] var: &'static str,
        #[case] value: &str,
        #[case] setting: &str,
    ) {
        let mut vars = cleared();
        vars.retain(|(name, _)| *name != var && *name != "CONCESSIONNAIRE_JWT_SECRET");
        vars.extend([
            (var, Some(value.to_owned())),
            ("CONCESSIONNAIRE_JWT_SECRET", Some("configured-secret".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let err = load_from_empty_args()
            .jwt_settings(BuildMode::Release)
            .expect_err("lifetime out of range");
        assert!(matches!(
            err,
            ConfigError::TokenLifetimeOutOfRange { setting: name, max, .. }
                if name == setting && max == MAX_TOKEN_TTL_SECS
        ));
    }

    #[rstest]
    fn invalid_bind_addresses_are_reported() {
        let mut vars = cleared();
        vars.retain(|(name, _)| *name != "CONCESSIONNAIRE_BIND_ADDR");
        vars.push(("CONCESSIONNAIRE_BIND_ADDR", Some("not-an-address".to_owned())));
        let _guard = lock_env(vars);

        let err = load_from_empty_args().bind_addr().expect_err("invalid");
        assert!(err.to_string().contains("not-an-address"));
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let _guard = lock_env(cleared());
        let mut settings = load_from_empty_args();
        settings.jwt_secret = Some("super-secret".to_owned());
        settings.database_url = Some("postgres://user:pw@db/app".to_owned());

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("pw@db"));
    }
}
