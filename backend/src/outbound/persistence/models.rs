//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{follows, users};
use crate::domain::{
    DisplayName, EmailAddress, FollowEdge, ImageUrl, NewUser, PhoneNumber, User, UserId,
    UserPatch,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub image_url: Option<String>,
}

impl UserRow {
    /// Re-validate a stored row into the domain model.
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let id = UserId::new(self.id).map_err(|err| format!("user row {}: {err}", self.id))?;
        let invalid = |err: crate::domain::UserValidationError| format!("user row {id}: {err}");
        let fields = NewUser {
            name: DisplayName::new(self.name).map_err(invalid)?,
            email: EmailAddress::new(self.email).map_err(invalid)?,
            phone: PhoneNumber::new(self.phone).map_err(invalid)?,
            dob: self.dob,
            // Blank avatars written by older clients read back as none.
            image_url: self.image_url.and_then(|url| ImageUrl::new(url).ok()),
        };
        Ok(User::new(id, fields))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub dob: NaiveDate,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            phone: user.phone.as_ref(),
            dob: user.dob,
            image_url: user.image_url.as_ref().map(AsRef::as_ref),
        }
    }
}

/// Changeset for partial user updates.
///
/// `None` fields are skipped; `image_url: Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub dob: Option<NaiveDate>,
    pub image_url: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> UserChangeset<'a> {
    pub(crate) fn new(patch: &'a UserPatch, now: DateTime<Utc>) -> Self {
        Self {
            name: patch.name.as_ref().map(AsRef::as_ref),
            email: patch.email.as_ref().map(AsRef::as_ref),
            phone: patch.phone.as_ref().map(AsRef::as_ref),
            dob: patch.dob,
            image_url: patch
                .image_url
                .as_ref()
                .map(|change| change.as_ref().map(AsRef::as_ref)),
            updated_at: now,
        }
    }
}

/// Row struct for the follows table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FollowRow {
    pub follower_id: i32,
    pub following_id: i32,
}

impl FollowRow {
    pub(crate) fn into_domain(self) -> Result<FollowEdge, String> {
        let describe = |err: &dyn std::fmt::Display| {
            format!("follow row {} -> {}: {err}", self.follower_id, self.following_id)
        };
        let follower = UserId::new(self.follower_id).map_err(|err| describe(&err))?;
        let followee = UserId::new(self.following_id).map_err(|err| describe(&err))?;
        FollowEdge::new(follower, followee).map_err(|err| describe(&err))
    }
}

impl From<FollowEdge> for FollowRow {
    fn from(edge: FollowEdge) -> Self {
        Self {
            follower_id: edge.follower().get(),
            following_id: edge.followee().get(),
        }
    }
}
