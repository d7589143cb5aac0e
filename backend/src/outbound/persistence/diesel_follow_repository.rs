//! PostgreSQL-backed `FollowRepository` implementation using Diesel ORM.
//!
//! The `(follower_id, following_id)` primary key is the authority on edge
//! uniqueness; its violation is reported as a duplicate edge, and foreign key
//! violations as a missing endpoint.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{FollowPersistenceError, FollowRepository};
use crate::domain::{FollowEdge, UserId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::FollowRow;
use super::pool::{DbPool, PoolError};
use super::schema::follows;

/// Diesel-backed implementation of the `FollowRepository` port.
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FollowPersistenceError {
    map_basic_pool_error(error, FollowPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> FollowPersistenceError {
    map_basic_diesel_error(
        error,
        FollowPersistenceError::query,
        FollowPersistenceError::connection,
    )
}

fn map_insert_error(error: DieselError, edge: FollowEdge) -> FollowPersistenceError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique(_)) => {
            FollowPersistenceError::duplicate_edge(edge.follower(), edge.followee())
        }
        Some(ConstraintViolation::ForeignKey(name)) => {
            FollowPersistenceError::missing_user(name.unwrap_or_else(|| edge.to_string()))
        }
        Some(violation) => {
            warn!(?violation, %edge, "unexpected constraint violation writing follow edge");
            FollowPersistenceError::query(format!(
                "constraint violated: {}",
                violation.constraint().unwrap_or("unknown")
            ))
        }
        None => map_diesel_error(error),
    }
}

fn rows_to_edges(rows: Vec<FollowRow>) -> Result<Vec<FollowEdge>, FollowPersistenceError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(FollowPersistenceError::query))
        .collect()
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn exists(&self, edge: FollowEdge) -> Result<bool, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = FollowRow::from(edge);
        let found: Option<i32> = follows::table
            .find((key.follower_id, key.following_id))
            .select(follows::follower_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn insert(&self, edge: FollowEdge) -> Result<(), FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = FollowRow::from(edge);

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(follows::table)
                    .values(&row)
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_insert_error(err, edge))?;
        Ok(())
    }

    async fn delete(&self, edge: FollowEdge) -> Result<bool, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = FollowRow::from(edge);

        let removed: usize = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(follows::table.find((key.follower_id, key.following_id)))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn edges_touching(&self, user: UserId) -> Result<Vec<FollowEdge>, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = user.get();
        let rows: Vec<FollowRow> = follows::table
            .filter(
                follows::follower_id
                    .eq(raw_id)
                    .or(follows::following_id.eq(raw_id)),
            )
            .select(FollowRow::as_select())
            .order((follows::follower_id.asc(), follows::following_id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_edges(rows)
    }

    async fn list_all(&self) -> Result<Vec<FollowEdge>, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FollowRow> = follows::table
            .select(FollowRow::as_select())
            .order((follows::follower_id.asc(), follows::following_id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_edges(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{edge, id};
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};
    use rstest::rstest;

    struct Violation(Option<&'static str>);

    impl DatabaseErrorInformation for Violation {
        fn message(&self) -> &str {
            "constraint violated"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("follows")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.0
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Violation(constraint)))
    }

    #[rstest]
    fn primary_key_violation_is_duplicate_edge() {
        let error = map_insert_error(
            database_error(DatabaseErrorKind::UniqueViolation, Some("follows_pkey")),
            edge(1, 2),
        );
        assert_eq!(error, FollowPersistenceError::duplicate_edge(id(1), id(2)));
    }

    #[rstest]
    #[case(Some("follows_following_id_fkey"), "follows_following_id_fkey")]
    #[case(None, "1 -> 2")]
    fn foreign_key_violation_is_missing_user(
        #[case] constraint: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let error = map_insert_error(
            database_error(DatabaseErrorKind::ForeignKeyViolation, constraint),
            edge(1, 2),
        );
        assert_eq!(error, FollowPersistenceError::missing_user(expected));
    }

    #[rstest]
    fn check_violation_is_a_query_error() {
        let error = map_insert_error(
            database_error(DatabaseErrorKind::CheckViolation, Some("follows_no_self_follow")),
            edge(3, 4),
        );
        assert_eq!(
            error,
            FollowPersistenceError::query("constraint violated: follows_no_self_follow")
        );
    }
}
