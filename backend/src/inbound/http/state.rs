//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FollowGraph, ImageHost, UserDirectory};

/// Parameter object bundling the port implementations handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub directory: Arc<dyn UserDirectory>,
    pub follows: Arc<dyn FollowGraph>,
    pub images: Arc<dyn ImageHost>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn UserDirectory>,
    pub follows: Arc<dyn FollowGraph>,
    pub images: Arc<dyn ImageHost>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use roster::domain::ports::{
    ///     FollowGraph, UnconfiguredImageHost, UserDirectory,
    /// };
    /// use roster::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// fn build(directory: Arc<dyn UserDirectory>, follows: Arc<dyn FollowGraph>) -> HttpState {
    ///     HttpState::new(HttpStatePorts {
    ///         directory,
    ///         follows,
    ///         images: Arc::new(UnconfiguredImageHost),
    ///     })
    /// }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            directory,
            follows,
            images,
        } = ports;
        Self {
            directory,
            follows,
            images,
        }
    }
}
