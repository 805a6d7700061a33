//! Print a service's OpenAPI document as JSON.
//!
//! ```text
//! openapi-dump carbon-track
//! openapi-dump user-directory
//! ```

use carbon_backend::doc::{CarbonTrackApiDoc, UserDirectoryApiDoc};
use clap::{Parser, ValueEnum};
use utoipa::OpenApi;

#[derive(Clone, Copy, ValueEnum)]
enum Service {
    CarbonTrack,
    UserDirectory,
}

#[derive(Parser)]
#[command(about = "Print the OpenAPI document for one service")]
struct Args {
    #[arg(value_enum, default_value_t = Service::CarbonTrack)]
    service: Service,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let document = match Args::parse().service {
        Service::CarbonTrack => CarbonTrackApiDoc::openapi(),
        Service::UserDirectory => UserDirectoryApiDoc::openapi(),
    };
    println!("{}", document.to_pretty_json()?);
    Ok(())
}
