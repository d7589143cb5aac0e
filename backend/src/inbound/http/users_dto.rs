//! Request and response bodies for the users endpoints.
//!
//! Incoming bodies keep every field optional so missing values surface as
//! field-level validation errors from the domain rather than as opaque JSON
//! extractor failures.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DOB_FORMAT, FollowSets, UserDraft, UserPatchDraft, UserProfile, UserSummary,
};

/// Registration body for `POST /api/users`.
///
/// Example JSON:
/// `{"name":"Alice","email":"alice@example.com","phone":"555-0100","dob":"1990-04-01"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
    #[schema(example = "1990-04-01")]
    pub dob: Option<String>,
    #[serde(alias = "image_url")]
    pub image_url: Option<String>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            dob: value.dob,
            image_url: value.image_url,
        }
    }
}

/// Partial update body for `PUT /api/users/{id}`.
///
/// Absent fields are left unchanged; `"imageUrl": null` clears the avatar.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    #[serde(default, alias = "image_url", deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub image_url: Option<Option<String>>,
}

/// Distinguish an explicit `null` from an absent key.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateUserRequest> for UserPatchDraft {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            dob: value.dob,
            image_url: value.image_url,
        }
    }
}

/// Compact reference to another user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryBody {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "Bob")]
    pub name: String,
}

impl From<&UserSummary> for UserSummaryBody {
    fn from(value: &UserSummary) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.to_string(),
        }
    }
}

/// A user decorated with its neighbours in the follow graph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "555-0100")]
    pub phone: String,
    #[schema(example = "1990-04-01")]
    pub dob: String,
    pub image_url: Option<String>,
    pub followers: Vec<UserSummaryBody>,
    pub following: Vec<UserSummaryBody>,
    pub follower_count: usize,
    pub following_count: usize,
}

impl From<&UserProfile> for UserBody {
    fn from(profile: &UserProfile) -> Self {
        let user = &profile.user;
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().as_ref().to_owned(),
            dob: user.dob().format(DOB_FORMAT).to_string(),
            image_url: user.image_url().map(ToString::to_string),
            followers: profile.followers.iter().map(UserSummaryBody::from).collect(),
            following: profile.following.iter().map(UserSummaryBody::from).collect(),
            follower_count: profile.follower_count(),
            following_count: profile.following_count(),
        }
    }
}

impl From<UserProfile> for UserBody {
    fn from(profile: UserProfile) -> Self {
        Self::from(&profile)
    }
}

/// Confirmation wrapping the stored user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserEnvelope {
    #[schema(example = "User created")]
    pub message: String,
    pub user: UserBody,
}

impl UserEnvelope {
    pub fn new(message: impl Into<String>, profile: &UserProfile) -> Self {
        Self {
            message: message.into(),
            user: UserBody::from(profile),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "User deleted")]
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Ids on either side of a user's follow edges.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct FollowEdgesBody {
    #[schema(example = json!([2, 3]))]
    pub followers: Vec<i32>,
    #[schema(example = json!([2]))]
    pub following: Vec<i32>,
}

impl From<FollowSets> for FollowEdgesBody {
    fn from(sets: FollowSets) -> Self {
        Self {
            followers: sets.followers.into_iter().map(|id| id.get()).collect(),
            following: sets.following.into_iter().map(|id| id.get()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{id, user};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn create_request_accepts_legacy_image_url_alias() {
        let request: CreateUserRequest = serde_json::from_value(json!({
            "name": "Alice",
            "image_url": "https://img.example/a.png"
        }))
        .expect("valid body");
        assert_eq!(request.image_url.as_deref(), Some("https://img.example/a.png"));
    }

    #[rstest]
    #[case(json!({}), None)]
    #[case(json!({"imageUrl": null}), Some(None))]
    #[case(json!({"imageUrl": "https://img.example/b.png"}), Some(Some("https://img.example/b.png".to_owned())))]
    fn update_request_distinguishes_absent_from_null(
        #[case] body: serde_json::Value,
        #[case] expected: Option<Option<String>>,
    ) {
        let request: UpdateUserRequest = serde_json::from_value(body).expect("valid body");
        assert_eq!(request.image_url, expected);
    }

    #[rstest]
    fn user_body_is_camel_case_with_counts() {
        let profile = UserProfile {
            user: user(1, "Alice"),
            followers: vec![UserSummary::from(&user(2, "Bob"))],
            following: Vec::new(),
        };
        let value = serde_json::to_value(UserBody::from(&profile)).expect("serializable");
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["imageUrl"], json!(null));
        assert_eq!(value["followerCount"], json!(1));
        assert_eq!(value["followingCount"], json!(0));
        assert_eq!(value["followers"], json!([{"id": 2, "name": "Bob"}]));
        assert!(value.get("image_url").is_none());
    }

    #[rstest]
    fn edge_sets_serialize_as_sorted_ids() {
        let sets = FollowSets {
            followers: [id(3), id(2)].into_iter().collect(),
            following: [id(2)].into_iter().collect(),
        };
        assert_eq!(
            serde_json::to_value(FollowEdgesBody::from(sets)).expect("serializable"),
            json!({"followers": [2, 3], "following": [2]})
        );
    }
}
