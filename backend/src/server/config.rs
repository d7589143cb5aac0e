//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use roster::domain::ports::{ImageHost, UnconfiguredImageHost};
use roster::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) image_host: Arc<dyn ImageHost>,
}

impl ServerConfig {
    /// Configuration that refuses uploads until an image host is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            image_host: Arc::new(UnconfiguredImageHost),
        }
    }

    /// Attach the adapter used for avatar uploads.
    #[must_use]
    pub fn with_image_host(mut self, image_host: Arc<dyn ImageHost>) -> Self {
        self.image_host = image_host;
        self
    }
}
