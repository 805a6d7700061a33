//! Diesel and pool failure classification shared by every repository.
//!
//! Each port has its own `Connection`/`Query` error pair; repositories pass
//! those constructors in so the classification lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure to the port's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "database pool unavailable");
    connection(message)
}

/// Map a Diesel failure to the port's query or connection error.
///
/// Closed connections are reported as connection failures so callers surface
/// them as `service_unavailable`; everything else is a query failure.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed".to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => query("database query error".to_owned()),
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

/// Whether the failure is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    //! Classification coverage for driver failures.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Query(String),
        Connection(String),
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Probe::Connection);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        let mapped = map_diesel_error(DieselError::NotFound, Probe::Query, Probe::Connection);
        assert_eq!(mapped, Probe::Query("record not found".to_owned()));
    }

    #[rstest]
    fn rollbacks_are_not_unique_violations() {
        assert!(!is_unique_violation(&DieselError::RollbackTransaction));
    }
}
