//! Shared helpers for integration tests that need PostgreSQL.
//!
//! Databases come from an embedded cluster started by the test binary. Set
//! `SKIP_TEST_CLUSTER=1` to skip these suites where the cluster cannot run;
//! otherwise a setup failure fails the test.

pub mod cluster_skip;
pub mod embedded_postgres;

use roster::domain::{NewUser, UserDraft};
use uuid::Uuid;

pub use embedded_postgres::{TestDatabase, test_database};

/// Registration fields with a unique email derived from `name`.
pub fn unique_draft(name: &str) -> UserDraft {
    UserDraft {
        name: Some(name.to_owned()),
        email: Some(format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4())),
        phone: Some("555-0100".to_owned()),
        dob: Some("1990-04-01".to_owned()),
        image_url: None,
    }
}

pub fn unique_user(name: &str) -> NewUser {
    NewUser::try_from(unique_draft(name)).expect("drafts are valid")
}
