//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserPatch};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{follows, users};

/// Name of the case-insensitive unique index on `users.email`.
const EMAIL_INDEX: &str = "users_email_lower_key";

diesel::define_sql_function! {
    /// SQL `lower(text)`.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map failures of writes that may collide with the email index.
fn map_write_error(error: DieselError, email: &str) -> UserPersistenceError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique(Some(name))) if name == EMAIL_INDEX => {
            UserPersistenceError::duplicate_email(email)
        }
        Some(violation) => {
            warn!(?violation, "unexpected constraint violation writing user");
            UserPersistenceError::query(format!(
                "constraint violated: {}",
                violation.constraint().unwrap_or("unknown")
            ))
        }
        None => map_diesel_error(error),
    }
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(UserPersistenceError::query))
        .collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| row.into_domain().map_err(UserPersistenceError::query))
            .transpose()
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(raw_ids))
            .select(UserRow::as_select())
            .order(users::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn email_taken(
        &self,
        email: &EmailAddress,
        excluding: Option<UserId>,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = users::table
            .select(users::id)
            .filter(lower(users::email).eq(email.normalized()))
            .into_boxed();
        if let Some(id) = excluding {
            query = query.filter(users::id.ne(id.get()));
        }
        let holder: Option<i32> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(holder.is_some())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow::from(user);

        let stored: UserRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(users::table)
                        .values(&row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, user.email.as_ref()))?;

        stored.into_domain().map_err(UserPersistenceError::query)
    }

    async fn update(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserChangeset::new(patch, Utc::now());
        let email = patch.email.as_ref().map(ToString::to_string).unwrap_or_default();

        let stored: Option<UserRow> = conn
            .transaction(|conn| {
                async move {
                    diesel::update(users::table.find(id.get()))
                        .set(&changeset)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, &email))?;

        stored
            .map(|row| row.into_domain().map_err(UserPersistenceError::query))
            .transpose()
    }

    async fn delete_with_edges(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        let (edges_removed, users_removed) = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let edges = diesel::delete(
                        follows::table.filter(
                            follows::follower_id
                                .eq(raw_id)
                                .or(follows::following_id.eq(raw_id)),
                        ),
                    )
                    .execute(conn)
                    .await?;
                    let users = diesel::delete(users::table.find(raw_id))
                        .execute(conn)
                        .await?;
                    Ok((edges, users))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(user_id = raw_id, edges_removed, users_removed, "user delete committed");
        Ok(users_removed > 0)
    }
}
