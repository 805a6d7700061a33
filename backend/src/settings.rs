//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CARBON_TRACK_*` / `USER_DIRECTORY_*`
//! environment variables and configuration files. Unset values fall back to
//! the defaults exposed by the accessor methods.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::{DEFAULT_POOL_SIZE, PoolConfig};
use crate::outbound::user_directory::DEFAULT_DIRECTORY_TIMEOUT;

const DEFAULT_TRACKER_PORT: u16 = 8080;
const DEFAULT_DIRECTORY_PORT: u16 = 8081;

fn any_interface(port: u16) -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port))
}

/// Errors raised when configured values cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("directory URL {value} is invalid: {message}")]
    InvalidDirectoryUrl { value: String, message: String },
    #[error("directory URL {value} must use http or https")]
    UnsupportedScheme { value: String },
}

fn pool_config(database_url: Option<&str>, pool_size: Option<u32>) -> Option<PoolConfig> {
    database_url.map(|url| {
        PoolConfig::new(url).with_max_size(pool_size.unwrap_or(DEFAULT_POOL_SIZE))
    })
}

/// Configuration for the carbon-track service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARBON_TRACK")]
pub struct CarbonTrackSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; in-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Base URL of the user directory; an in-process directory is used when
    /// unset.
    pub directory_url: Option<String>,
    /// Directory request timeout in milliseconds.
    pub directory_timeout_ms: Option<u64>,
}

impl CarbonTrackSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| any_interface(DEFAULT_TRACKER_PORT))
    }

    pub fn pool_config(&self) -> Option<PoolConfig> {
        pool_config(self.database_url.as_deref(), self.pool_size)
    }

    pub fn directory_timeout(&self) -> Duration {
        self.directory_timeout_ms
            .map_or(DEFAULT_DIRECTORY_TIMEOUT, Duration::from_millis)
    }

    /// Parse the configured directory URL, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the value is not an absolute http(s)
    /// URL.
    pub fn directory_url(&self) -> Result<Option<Url>, SettingsError> {
        let Some(raw) = self.directory_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(|err| SettingsError::InvalidDirectoryUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Some(url)),
            _ => Err(SettingsError::UnsupportedScheme {
                value: raw.to_owned(),
            }),
        }
    }
}

/// Configuration for the user-directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct UserDirectorySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; an in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
}

impl UserDirectorySettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| any_interface(DEFAULT_DIRECTORY_PORT))
    }

    pub fn pool_config(&self) -> Option<PoolConfig> {
        pool_config(self.database_url.as_deref(), self.pool_size)
    }
}
