//! Shared Diesel error classification for the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Integrity constraint that rejected a write, with its name when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique(Option<String>),
    ForeignKey(Option<String>),
    Check(Option<String>),
}

impl ConstraintViolation {
    pub(crate) fn constraint(&self) -> Option<&str> {
        match self {
            Self::Unique(name) | Self::ForeignKey(name) | Self::Check(name) => name.as_deref(),
        }
    }
}

/// Recognise integrity violations so callers can translate them.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let name = info.constraint_name().map(str::to_owned);
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique(name)),
        DatabaseErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey(name)),
        DatabaseErrorKind::CheckViolation => Some(ConstraintViolation::Check(name)),
        _ => None,
    }
}

/// Map the remaining Diesel failures into query or connection errors.
///
/// Messages are generic; the driver's own text only reaches the debug log.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::BrokenTransactionManager => connection("transaction manager broken"),
        _ => query("database error"),
    }
}
