//! Server entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use concessionnaire_api::inbound::http::health::HealthState;
use concessionnaire_api::outbound::persistence::{DbPool, run_pending_migrations};
use server::{BuildMode, ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let jwt = settings.jwt_settings(BuildMode::from_debug_assertions())?;
    let mut config = ServerConfig::new(bind_addr, jwt);

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            let url = pool_config.database_url().to_owned();
            let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
                .await
                .wrap_err("migration task panicked")??;
            info!(count = applied.len(), versions = ?applied, "migrations applied");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await?;
    Ok(())
}
