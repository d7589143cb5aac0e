//! Driving port for the user directory.
//!
//! Inbound adapters call this instead of touching repositories so that
//! validation, conflict detection, and decoration live in one place.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId, UserPatchDraft, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user, decorated with follower and following summaries.
    async fn list(&self) -> Result<Vec<UserProfile>, Error>;

    /// One decorated user.
    async fn get(&self, id: UserId) -> Result<UserProfile, Error>;

    /// Validate and register a new user.
    async fn create(&self, draft: UserDraft) -> Result<UserProfile, Error>;

    /// Validate and merge a partial update.
    async fn update(&self, id: UserId, draft: UserPatchDraft) -> Result<UserProfile, Error>;

    /// Delete the user together with every edge touching it.
    async fn remove(&self, id: UserId) -> Result<(), Error>;
}
