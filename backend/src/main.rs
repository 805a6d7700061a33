//! carbon-track entry-point: footprint submissions, history and leaderboards.

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use carbon_backend::inbound::http::health::HealthState;
use carbon_backend::outbound::user_directory::UserDirectoryHttpClient;
use carbon_backend::server::{
    ServerConfig, TrackerDirectory, create_carbon_server, prepare_database,
};
use carbon_backend::settings::CarbonTrackSettings;

/// Application bootstrap.
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

    let settings = CarbonTrackSettings::load()
        .map_err(|err| eyre!("failed to load carbon-track configuration: {err}"))?;

    let directory = match settings.directory_url()? {
        Some(url) => {
            info!(directory_url = %url, "using remote user directory");
            TrackerDirectory::Remote(
                UserDirectoryHttpClient::new(url, settings.directory_timeout())
                    .wrap_err("failed to build user-directory client")?,
            )
        }
        None => {
            warn!("no directory URL configured; serving an in-process user directory");
            TrackerDirectory::in_process()
        }
    };

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        let pool = prepare_database(pool_config)
            .await
            .wrap_err("failed to prepare database")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database URL configured; footprints are kept in memory");
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(carbon_backend::server::prometheus_for("carbon_track"));

    let health_state = web::Data::new(HealthState::new());
    let server = create_carbon_server(health_state, config, directory)
        .wrap_err("failed to start carbon-track server")?;
    server.await.wrap_err("carbon-track server failed")
}
