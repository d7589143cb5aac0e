//! Backend entry-point: applies migrations, wires REST endpoints, and serves
//! OpenAPI docs.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use roster::inbound::http::health::HealthState;
use roster::outbound::image_host::HttpImageHost;
use roster::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings
        .database_url()
        .ok_or_else(|| io::Error::other("ROSTER_DATABASE_URL must be set"))?
        .to_owned();

    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied = applied.len(), "database schema is current");

    let pool_config = PoolConfig::new(database_url)
        .with_max_size(settings.pool_max_size())
        .with_connection_timeout(settings.pool_timeout());
    let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr, pool);
    match settings.image_host_url() {
        Some(raw) => {
            let endpoint = Url::parse(raw)
                .map_err(|e| io::Error::other(format!("invalid image host URL: {e}")))?;
            let host = HttpImageHost::new(
                endpoint,
                settings.image_host_token().map(str::to_owned),
                settings.image_host_timeout(),
            )
            .map_err(io::Error::other)?;
            config = config.with_image_host(Arc::new(host));
        }
        None => warn!("no image host configured; uploads will be refused"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}
