//! Follow graph model.
//!
//! Edges are directed: `follower` follows `followee`. The reverse edge is an
//! independent relationship. Self-loops are unrepresentable through
//! [`FollowEdge::new`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::user::{DisplayName, User, UserId};

/// Failures constructing a [`FollowEdge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowEdgeError {
    SelfFollow { user: UserId },
}

impl fmt::Display for FollowEdgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfFollow { user } => write!(f, "user {user} cannot follow themselves"),
        }
    }
}

impl std::error::Error for FollowEdgeError {}

/// One directed follow relationship.
///
/// # Examples
/// ```
/// use roster::domain::{FollowEdge, UserId};
///
/// let alice = UserId::new(1).unwrap();
/// let bob = UserId::new(2).unwrap();
/// let edge = FollowEdge::new(alice, bob).unwrap();
/// assert_eq!(edge.follower(), alice);
/// assert!(FollowEdge::new(alice, alice).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FollowEdge {
    follower: UserId,
    followee: UserId,
}

impl FollowEdge {
    pub fn new(follower: UserId, followee: UserId) -> Result<Self, FollowEdgeError> {
        if follower == followee {
            return Err(FollowEdgeError::SelfFollow { user: follower });
        }
        Ok(Self { follower, followee })
    }

    #[must_use]
    pub fn follower(&self) -> UserId {
        self.follower
    }

    #[must_use]
    pub fn followee(&self) -> UserId {
        self.followee
    }
}

impl fmt::Display for FollowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.follower, self.followee)
    }
}

/// Ids adjacent to one user, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowSets {
    /// Users following the subject.
    pub followers: BTreeSet<UserId>,
    /// Users the subject follows.
    pub following: BTreeSet<UserId>,
}

impl FollowSets {
    /// Collect the neighbourhood of `user` from an arbitrary edge list.
    pub fn for_user<'a>(user: UserId, edges: impl IntoIterator<Item = &'a FollowEdge>) -> Self {
        let mut sets = Self::default();
        for edge in edges {
            if edge.followee == user {
                sets.followers.insert(edge.follower);
            }
            if edge.follower == user {
                sets.following.insert(edge.followee);
            }
        }
        sets
    }

    /// Every id referenced by either set.
    pub fn neighbours(&self) -> impl Iterator<Item = UserId> + '_ {
        self.followers.union(&self.following).copied()
    }
}

/// Minimal `{id, name}` view of a user used when decorating listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: DisplayName,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().clone(),
        }
    }
}

/// A user decorated with the summaries of its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

impl UserProfile {
    /// Decorate `user` using `edges` and a directory of known summaries.
    ///
    /// Neighbours missing from `directory` are skipped; the foreign keys keep
    /// this from happening against a consistent store.
    #[must_use]
    pub fn assemble<S>(
        user: User,
        edges: &[FollowEdge],
        directory: &HashMap<UserId, UserSummary, S>,
    ) -> Self
    where
        S: std::hash::BuildHasher,
    {
        let sets = FollowSets::for_user(user.id(), edges);
        let lookup = |ids: &BTreeSet<UserId>| -> Vec<UserSummary> {
            ids.iter().filter_map(|id| directory.get(id).cloned()).collect()
        };
        Self {
            followers: lookup(&sets.followers),
            following: lookup(&sets.following),
            user,
        }
    }

    #[must_use]
    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    #[must_use]
    pub fn following_count(&self) -> usize {
        self.following.len()
    }
}

/// Result of a successful follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowConfirmation {
    pub follower: UserSummary,
    pub followee: UserSummary,
}

impl FollowConfirmation {
    /// Human-readable confirmation, e.g. `"Alice is now following Bob"`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} is now following {}",
            self.follower.name, self.followee.name
        )
    }
}
