//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockFollowGraph, MockImageHost, MockUserDirectory};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::{follows, json_config, uploads, users};

/// Mock ports handed to [`test_app`]. Unset expectations panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub directory: MockUserDirectory,
    pub follows: MockFollowGraph,
    pub images: MockImageHost,
}

/// Build an app exposing every `/api` route over the supplied mocks.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(HttpStatePorts {
        directory: Arc::new(ports.directory),
        follows: Arc::new(ports.follows),
        images: Arc::new(ports.images),
    });
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .service(
            web::scope("/api")
                .service(follows::follow_user)
                .service(follows::unfollow_user)
                .service(users::list_users)
                .service(users::create_user)
                .service(users::user_edges)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user)
                .service(uploads::upload_service()),
        )
}
