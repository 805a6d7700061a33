//! HTTP inbound adapter exposing the carbon-track and user-directory REST
//! endpoints.

pub mod carbon_track;
pub mod directory;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::{ApiResult, json_config, path_config};
