//! Shared translation of pool and Diesel failures into port errors.
//!
//! Every port error enum exposes `connection` and `query` constructors, so
//! the adapters pass those in and receive their own error type back.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the port's `connection` constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map a Diesel failure through the port's `query` or `connection`
/// constructor.
///
/// Closed connections count as the store being unreachable; everything else
/// is a failed query.
pub(crate) fn map_diesel_error<E, Q, C>(
    error: DieselError,
    operation: &'static str,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, detail = info.message(), operation, "diesel operation failed");
        }
        other => debug!(error = %other, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection(format!("{operation}: database connection closed"))
        }
        DieselError::BrokenTransactionManager => {
            connection(format!("{operation}: transaction manager broken"))
        }
        other => query(format!("{operation}: {other}")),
    }
}

/// Collect row conversions, mapping the first failure through `map_err`.
pub(crate) fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}
