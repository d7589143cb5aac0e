//! Builders shared by domain and adapter unit tests.

use super::{FollowEdge, NewUser, User, UserDraft, UserId};

pub(crate) fn id(raw: i32) -> UserId {
    UserId::new(raw).expect("test ids are positive")
}

pub(crate) fn draft(name: &str) -> UserDraft {
    UserDraft {
        name: Some(name.to_owned()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: Some("555-0100".to_owned()),
        dob: Some("1990-04-01".to_owned()),
        image_url: None,
    }
}

pub(crate) fn user(raw_id: i32, name: &str) -> User {
    let fields = NewUser::try_from(draft(name)).expect("test drafts are valid");
    User::new(id(raw_id), fields)
}

pub(crate) fn edge(follower: i32, followee: i32) -> FollowEdge {
    FollowEdge::new(id(follower), id(followee)).expect("test edges are not self-loops")
}
