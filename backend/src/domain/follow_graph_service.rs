//! Follow graph domain service.
//!
//! Enforces the edge rules (no self-follow, both endpoints exist, one edge per
//! ordered pair) before delegating to the [`FollowRepository`]. The duplicate
//! check here only produces a friendlier error; the storage key is what
//! actually guarantees uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::repository_errors::{
    already_following, map_follow_persistence_error, map_user_persistence_error, user_not_found,
};
use crate::domain::ports::{FollowGraph, FollowRepository, UserRepository};
use crate::domain::{Error, FollowConfirmation, FollowEdge, FollowSets, User, UserId, UserSummary};

/// Follow graph service implementing the driving port.
#[derive(Clone)]
pub struct FollowGraphService<U, F> {
    users: Arc<U>,
    follows: Arc<F>,
}

impl<U, F> FollowGraphService<U, F> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, follows: Arc<F>) -> Self {
        Self { users, follows }
    }
}

fn edge_not_found() -> Error {
    Error::not_found("Follow relationship not found")
}

impl<U, F> FollowGraphService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn require(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<U, F> FollowGraph for FollowGraphService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn follow(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<FollowConfirmation, Error> {
        let edge = FollowEdge::new(follower, followee)
            .map_err(|_| Error::invalid_argument("Cannot follow yourself"))?;
        let follower_user = self.require(follower).await?;
        let followee_user = self.require(followee).await?;

        let exists = self
            .follows
            .exists(edge)
            .await
            .map_err(map_follow_persistence_error)?;
        if exists {
            return Err(already_following(follower, followee));
        }
        self.follows
            .insert(edge)
            .await
            .map_err(map_follow_persistence_error)?;

        info!(%follower, %followee, "follow edge created");
        Ok(FollowConfirmation {
            follower: UserSummary::from(&follower_user),
            followee: UserSummary::from(&followee_user),
        })
    }

    async fn unfollow(&self, follower: UserId, followee: UserId) -> Result<(), Error> {
        // A self-loop can never be stored, so there is nothing to remove.
        let edge = FollowEdge::new(follower, followee).map_err(|_| edge_not_found())?;
        let removed = self
            .follows
            .delete(edge)
            .await
            .map_err(map_follow_persistence_error)?;
        if !removed {
            return Err(edge_not_found());
        }
        info!(%follower, %followee, "follow edge removed");
        Ok(())
    }

    async fn edges_for(&self, user: UserId) -> Result<FollowSets, Error> {
        self.require(user).await?;
        let edges = self
            .follows
            .edges_touching(user)
            .await
            .map_err(map_follow_persistence_error)?;
        Ok(FollowSets::for_user(user, &edges))
    }
}

#[cfg(test)]
#[path = "follow_graph_service_tests.rs"]
mod tests;
