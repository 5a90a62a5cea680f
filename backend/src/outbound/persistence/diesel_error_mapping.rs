//! Diesel and pool error mapping shared by the weather repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ResourceRepositoryError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> ResourceRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ResourceRepositoryError::connection(message)
}

/// Constraint violations keep the constraint name so the domain can decide
/// whether the caller may see them. Everything else is reduced to a
/// connection or query failure and logged here.
pub(super) fn map_diesel_error(error: DieselError) -> ResourceRepositoryError {
    match error {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation),
            info,
        ) => {
            let constraint = info.constraint_name().unwrap_or_default();
            debug!(?kind, constraint, message = info.message(), "constraint violated");
            ResourceRepositoryError::constraint_violation(constraint)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed");
            ResourceRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            ResourceRepositoryError::query("database error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            ResourceRepositoryError::query("database error")
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    #[derive(Debug)]
    struct Info {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "rejected"
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { constraint }))
    }

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation, Some("states_pkey"), "states_pkey")]
    #[case(
        DatabaseErrorKind::ForeignKeyViolation,
        Some("temperatures_city_id_fkey"),
        "temperatures_city_id_fkey"
    )]
    #[case(DatabaseErrorKind::CheckViolation, None, "")]
    fn violations_keep_the_constraint_name(
        #[case] kind: DatabaseErrorKind,
        #[case] constraint: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mapped = map_diesel_error(database_error(kind, constraint));
        assert_eq!(mapped, ResourceRepositoryError::constraint_violation(expected));
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let mapped = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(mapped, ResourceRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn other_failures_are_query_errors() {
        let mapped = map_diesel_error(DieselError::NotFound);
        assert!(matches!(mapped, ResourceRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_checkout_failures_are_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, ResourceRepositoryError::connection("timed out"));
    }
}
