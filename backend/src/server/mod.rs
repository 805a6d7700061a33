//! Server construction and middleware wiring for both services.

mod config;
mod database;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;
pub use database::{DatabaseStartupError, prepare_database};
#[cfg(feature = "metrics")]
pub use metrics::prometheus_for;
pub use state_builders::{
    TrackerDirectory, build_directory_state, build_tracker_state, in_process_directory_state,
};

#[cfg(feature = "metrics")]
use metrics::OptionalMetrics;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{CarbonTrackApiDoc, UserDirectoryApiDoc};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{DirectoryState, TrackerState};
use crate::inbound::http::{carbon_track, directory, json_config, path_config};

/// Shared per-worker state for the carbon-track app.
#[derive(Clone)]
pub struct TrackerDependencies {
    pub health_state: web::Data<HealthState>,
    pub tracker_state: web::Data<TrackerState>,
    /// Present when the directory runs in-process.
    pub directory_state: Option<web::Data<DirectoryState>>,
}

/// Build the carbon-track app.
pub fn build_tracker_app(
    deps: TrackerDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let TrackerDependencies {
        health_state,
        tracker_state,
        directory_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(tracker_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(carbon_track::configure)
        .service(ready)
        .service(live);

    let app = match directory_state {
        Some(state) => app.app_data(state).configure(directory::configure),
        None => app,
    };

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", CarbonTrackApiDoc::openapi()),
    );

    app
}

/// Build the user-directory app.
pub fn build_directory_app(
    health_state: web::Data<HealthState>,
    directory_state: web::Data<DirectoryState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(directory_state)
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(directory::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", UserDirectoryApiDoc::openapi()),
    );

    app
}

/// Construct the carbon-track HTTP server.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_carbon_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    directory: TrackerDirectory,
) -> std::io::Result<Server> {
    let deps = TrackerDependencies {
        health_state: health_state.clone(),
        tracker_state: web::Data::new(build_tracker_state(config.db_pool.as_ref(), &directory)),
        directory_state: in_process_directory_state(&directory).map(web::Data::new),
    };
    info!(
        bind_addr = %config.bind_addr,
        database = config.has_database(),
        in_process_directory = deps.directory_state.is_some(),
        "starting carbon-track"
    );

    #[cfg(feature = "metrics")]
    let metrics = OptionalMetrics::from(config.prometheus);

    let server = HttpServer::new(move || {
        let app = build_tracker_app(deps.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Construct the user-directory HTTP server.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_directory_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let directory_state = web::Data::new(build_directory_state(config.db_pool.as_ref()));
    info!(
        bind_addr = %config.bind_addr,
        database = config.has_database(),
        "starting user-directory"
    );

    #[cfg(feature = "metrics")]
    let metrics = OptionalMetrics::from(config.prometheus);

    let server = HttpServer::new(move || {
        let app = build_directory_app(server_health_state.clone(), directory_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
