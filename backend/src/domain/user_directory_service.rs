//! User directory domain service.
//!
//! Implements [`UserDirectory`] over a [`UserRepository`] and a
//! [`FollowRepository`]; the latter is only read to decorate users with their
//! follower and following summaries.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::repository_errors::{
    email_conflict, map_follow_persistence_error, map_user_persistence_error, user_not_found,
    validation_error,
};
use crate::domain::ports::{FollowRepository, UserDirectory, UserRepository};
use crate::domain::{
    Error, FollowEdge, FollowSets, NewUser, User, UserDraft, UserId, UserPatch, UserPatchDraft,
    UserProfile, UserSummary,
};

/// User directory service implementing the driving port.
#[derive(Clone)]
pub struct UserDirectoryService<U, F> {
    users: Arc<U>,
    follows: Arc<F>,
}

impl<U, F> UserDirectoryService<U, F> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, follows: Arc<F>) -> Self {
        Self { users, follows }
    }
}

fn summaries<'a>(users: impl IntoIterator<Item = &'a User>) -> HashMap<UserId, UserSummary> {
    users
        .into_iter()
        .map(|user| (user.id(), UserSummary::from(user)))
        .collect()
}

impl<U, F> UserDirectoryService<U, F>
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

    async fn decorate(&self, user: User) -> Result<UserProfile, Error> {
        let edges: Vec<FollowEdge> = self
            .follows
            .edges_touching(user.id())
            .await
            .map_err(map_follow_persistence_error)?;
        let neighbours: Vec<UserId> = FollowSets::for_user(user.id(), &edges)
            .neighbours()
            .collect();
        let directory = if neighbours.is_empty() {
            HashMap::new()
        } else {
            let found = self
                .users
                .find_many(&neighbours)
                .await
                .map_err(map_user_persistence_error)?;
            summaries(&found)
        };
        Ok(UserProfile::assemble(user, &edges, &directory))
    }

    async fn ensure_email_free(&self, patch: &UserPatch, id: UserId) -> Result<(), Error> {
        let Some(email) = &patch.email else {
            return Ok(());
        };
        let taken = self
            .users
            .email_taken(email, Some(id))
            .await
            .map_err(map_user_persistence_error)?;
        if taken {
            return Err(email_conflict(email.as_ref()));
        }
        Ok(())
    }
}

#[async_trait]
impl<U, F> UserDirectory for UserDirectoryService<U, F>
where
    U: UserRepository,
    F: FollowRepository,
{
    async fn list(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self.users.list().await.map_err(map_user_persistence_error)?;
        let edges = self
            .follows
            .list_all()
            .await
            .map_err(map_follow_persistence_error)?;
        let directory = summaries(&users);
        debug!(users = users.len(), edges = edges.len(), "listing directory");
        Ok(users
            .into_iter()
            .map(|user| UserProfile::assemble(user, &edges, &directory))
            .collect())
    }

    async fn get(&self, id: UserId) -> Result<UserProfile, Error> {
        let user = self.require(id).await?;
        self.decorate(user).await
    }

    async fn create(&self, draft: UserDraft) -> Result<UserProfile, Error> {
        let fields = NewUser::try_from(draft).map_err(|errors| validation_error(&errors))?;
        let taken = self
            .users
            .email_taken(&fields.email, None)
            .await
            .map_err(map_user_persistence_error)?;
        if taken {
            return Err(email_conflict(fields.email.as_ref()));
        }

        let user = self
            .users
            .insert(&fields)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(UserProfile::assemble(user, &[], &HashMap::new()))
    }

    async fn update(&self, id: UserId, draft: UserPatchDraft) -> Result<UserProfile, Error> {
        let current = self.require(id).await?;
        let patch = UserPatch::try_from(draft).map_err(|errors| validation_error(&errors))?;
        if patch.is_empty() {
            return self.decorate(current).await;
        }
        self.ensure_email_free(&patch, id).await?;

        let updated = self
            .users
            .update(id, &patch)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "user updated");
        self.decorate(updated).await
    }

    async fn remove(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete_with_edges(id)
            .await
            .map_err(map_user_persistence_error)?;
        if !removed {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user removed with its follow edges");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
