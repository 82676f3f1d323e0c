//! Shared Diesel error mapping for the Q&A repositories.
//!
//! Each repository passes constructors for its own port error so the mapping
//! of pool and driver failures stays in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Constraint failures that repositories translate into dedicated variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Classify a Diesel error as a constraint violation, if it is one.
pub(crate) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(ConstraintViolation::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Some(ConstraintViolation::ForeignKey)
        }
        _ => None,
    }
}

/// Name of the foreign key a Diesel error violated, if it is one.
pub(crate) fn violated_foreign_key(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            info.constraint_name()
        }
        _ => None,
    }
}

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel errors into query/connection constructors.
///
/// Closed connections become connection errors; everything else is a query
/// error with a generic message so SQL details stay in debug logs.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
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
        _ => query("database error"),
    }
}
