//! Port abstraction for follow edge persistence.

use async_trait::async_trait;

use crate::domain::{FollowEdge, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by follow repository adapters.
    pub enum FollowPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "follow repository query failed: {message}",
        /// The `(follower_id, following_id)` key already exists.
        DuplicateEdge { follower: UserId, followee: UserId } =>
            "user {follower} already follows user {followee}",
        /// An endpoint vanished before the edge could be written.
        MissingUser { message: String } => "follow endpoint does not exist: {message}",
    }
}

/// Storage of directed follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Whether `edge` is already stored.
    async fn exists(&self, edge: FollowEdge) -> Result<bool, FollowPersistenceError>;

    /// Store `edge` in a transaction.
    async fn insert(&self, edge: FollowEdge) -> Result<(), FollowPersistenceError>;

    /// Remove `edge` in a transaction. Returns `false` when it was absent.
    async fn delete(&self, edge: FollowEdge) -> Result<bool, FollowPersistenceError>;

    /// Every edge with `user` at either end.
    async fn edges_touching(&self, user: UserId) -> Result<Vec<FollowEdge>, FollowPersistenceError>;

    /// Every stored edge.
    async fn list_all(&self) -> Result<Vec<FollowEdge>, FollowPersistenceError>;
}
