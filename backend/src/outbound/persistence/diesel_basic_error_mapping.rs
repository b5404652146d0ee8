//! Diesel and pool error mapping shared by the user and profile repositories.
//!
//! Both repositories expose the same `Connection`/`Query` port error shape,
//! so the mapping is written once over constructor closures. Writers that can
//! race on a unique key use [`map_diesel_error_with_conflict`].

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
///
/// Database messages are logged at `debug` and replaced with a fixed summary
/// so SQL details never reach clients.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("foreign key constraint violated")
        }
        DieselError::DeserializationError(_) => query("failed to decode database row"),
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], but unique violations go to `conflict`.
pub fn map_diesel_error_with_conflict<E, Q, C, K>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
    conflict: K,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    K: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        debug!(message = info.message(), "unique constraint violated");
        return conflict("unique constraint violated");
    }
    map_basic_diesel_error(error, query, connection)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
        Conflict(String),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(
            error,
            |message| Mapped::Query(message.to_owned()),
            |message| Mapped::Connection(message.to_owned()),
        )
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(
            map(error),
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    fn unique_violation_hides_constraint_details() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates \"users_email_key\"".to_owned()),
        );
        assert_eq!(
            map(error),
            Mapped::Query("unique constraint violated".to_owned())
        );
    }

    fn map_with_conflict(error: DieselError) -> Mapped {
        map_diesel_error_with_conflict(
            error,
            |message| Mapped::Query(message.to_owned()),
            |message| Mapped::Connection(message.to_owned()),
            |message| Mapped::Conflict(message.to_owned()),
        )
    }

    #[rstest]
    fn conflict_aware_mapping_routes_unique_violations() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates \"companion_profiles_user_id_key\"".to_owned()),
        );
        assert_eq!(
            map_with_conflict(error),
            Mapped::Conflict("unique constraint violated".to_owned())
        );
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found".to_owned()))]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("missing owner".to_owned()),
        ),
        Mapped::Query("foreign key constraint violated".to_owned())
    )]
    #[case(
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        ),
        Mapped::Connection("database connection error".to_owned())
    )]
    fn conflict_aware_mapping_defers_other_errors(
        #[case] error: DieselError,
        #[case] expected: Mapped,
    ) {
        assert_eq!(map_with_conflict(error), expected);
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            Mapped::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped: Mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| {
            Mapped::Connection(message)
        });
        assert_eq!(mapped, Mapped::Connection("timed out".to_owned()));
    }
}
