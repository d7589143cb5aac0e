//! Process settings loaded via OrthoConfig.
//!
//! Values come from `ROSTER_*` environment variables, an optional
//! configuration file, or command-line flags.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_IMAGE_HOST_TIMEOUT_SECS: u64 = 30;

/// Settings needed to start the server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Endpoint receiving avatar uploads. Uploads are refused when unset.
    pub image_host_url: Option<String>,
    /// Bearer token sent to the image host.
    pub image_host_token: Option<String>,
    /// Seconds to wait for the image host.
    pub image_host_timeout_secs: Option<u64>,
}

impl AppSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    /// Returns an error when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host(), self.port()).parse()
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS))
    }

    pub fn image_host_url(&self) -> Option<&str> {
        self.image_host_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn image_host_token(&self) -> Option<&str> {
        self.image_host_token.as_deref()
    }

    pub fn image_host_timeout(&self) -> Duration {
        Duration::from_secs(
            self.image_host_timeout_secs
                .unwrap_or(DEFAULT_IMAGE_HOST_TIMEOUT_SECS),
        )
    }
}
