//! Driving port for the follow graph.

use async_trait::async_trait;

use crate::domain::{Error, FollowConfirmation, FollowSets, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowGraph: Send + Sync {
    /// Make `follower` follow `followee`.
    async fn follow(&self, follower: UserId, followee: UserId)
    -> Result<FollowConfirmation, Error>;

    /// Remove the edge `follower -> followee`.
    async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), Error>;

    /// Ids following `user` and ids `user` follows.
    async fn edges_for(&self, user: UserId) -> Result<FollowSets, Error>;
}
