//! Remote user-directory adapter.
//!
//! A thin reqwest implementation of the `UserDirectory` port used by the
//! carbon-track service to look up and credit users.

mod dto;
mod http_client;

pub use http_client::{DEFAULT_DIRECTORY_TIMEOUT, UserDirectoryHttpClient};
