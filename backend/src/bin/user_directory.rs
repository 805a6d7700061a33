//! user-directory entry-point: registration, lookup and user totals.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use carbon_backend::inbound::http::health::HealthState;
use carbon_backend::server::{ServerConfig, create_directory_server, prepare_database};
use carbon_backend::settings::UserDirectorySettings;

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

    let settings = UserDirectorySettings::load()
        .map_err(|err| eyre!("failed to load user-directory configuration: {err}"))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        let pool = prepare_database(pool_config)
            .await
            .wrap_err("failed to prepare database")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; users are kept in memory");
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(carbon_backend::server::prometheus_for("user_directory"));

    let health_state = web::Data::new(HealthState::new());
    let server = create_directory_server(health_state, config)
        .wrap_err("failed to start user-directory server")?;
    server.await.wrap_err("user-directory server failed")
}
