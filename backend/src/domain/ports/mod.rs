//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod follow_graph;
mod follow_repository;
mod image_host;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use follow_graph::MockFollowGraph;
pub use follow_graph::FollowGraph;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FollowPersistenceError, FollowRepository};
#[cfg(test)]
pub use image_host::MockImageHost;
pub use image_host::{ImageHost, ImageHostError, UnconfiguredImageHost};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
