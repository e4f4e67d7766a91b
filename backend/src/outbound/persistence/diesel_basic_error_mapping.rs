//! Shared Diesel error mapping for the intake and account repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Name of the unique constraint a failed statement violated, if any.
///
/// Returns `None` for every other failure, including unique violations the
/// server reported without a constraint name.
pub fn violated_unique_constraint(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name()
        }
        _ => None,
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("foreign key constraint violated")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, Mapped::Query("database error"))]
    fn maps_non_database_errors(#[case] error: DieselError, #[case] expected: Mapped) {
        let mapped = map_basic_diesel_error(error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }

    #[rstest]
    fn non_database_errors_name_no_constraint() {
        assert_eq!(violated_unique_constraint(&DieselError::NotFound), None);
    }
}
