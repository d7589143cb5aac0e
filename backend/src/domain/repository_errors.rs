//! Translation of port failures into domain errors.

use serde_json::{Value, json};
use tracing::warn;

use super::ports::{FollowPersistenceError, UserPersistenceError};
use super::{Error, UserId, UserValidationErrors};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => email_conflict(&email),
    }
}

pub(crate) fn map_follow_persistence_error(error: FollowPersistenceError) -> Error {
    match error {
        FollowPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowPersistenceError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
        FollowPersistenceError::DuplicateEdge { follower, followee } => {
            already_following(follower, followee)
        }
        FollowPersistenceError::MissingUser { message } => {
            warn!(%message, "follow endpoint disappeared during insert");
            Error::not_found("User not found")
        }
    }
}

pub(crate) fn email_conflict(email: &str) -> Error {
    Error::conflict("Email already exists").with_details(json!({
        "field": "email",
        "value": email,
        "code": "duplicate_email",
    }))
}

pub(crate) fn already_following(follower: UserId, followee: UserId) -> Error {
    Error::conflict("Already following").with_details(json!({
        "followerId": follower.get(),
        "followingId": followee.get(),
        "code": "duplicate_follow",
    }))
}

pub(crate) fn user_not_found(id: UserId) -> Error {
    Error::not_found("User not found").with_details(json!({ "id": id.get() }))
}

/// Build an `invalid_request` error listing every failing field.
pub(crate) fn validation_error(errors: &UserValidationErrors) -> Error {
    let fields: Vec<Value> = errors
        .iter()
        .map(|error| {
            json!({
                "field": error.field().as_str(),
                "code": error.code(),
                "message": error.to_string(),
            })
        })
        .collect();
    Error::invalid_request(errors.to_string()).with_details(json!({ "fields": fields }))
}
