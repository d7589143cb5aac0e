//! Builders wiring Diesel repositories into the domain services.

use std::sync::Arc;

use actix_web::web;

use roster::domain::{FollowGraphService, UserDirectoryService};
use roster::inbound::http::state::{HttpState, HttpStatePorts};
use roster::outbound::persistence::{DieselFollowRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the handler state from the configured pool and image host.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    let follows = Arc::new(DieselFollowRepository::new(config.db_pool.clone()));

    web::Data::new(HttpState::new(HttpStatePorts {
        directory: Arc::new(UserDirectoryService::new(users.clone(), follows.clone())),
        follows: Arc::new(FollowGraphService::new(users, follows)),
        images: config.image_host.clone(),
    }))
}
