//! Shared Diesel error classification for the repositories.
//!
//! Driver text stays in debug logs. Callers only see short fixed summaries,
//! so these messages are safe to echo to clients.

use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to what the ports care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(&'static str),
    Query(&'static str),
    UniqueViolation,
}

/// Extract the message carried by a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging the driver detail at debug level.
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> StoreFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StoreFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error")
        }
        _ => StoreFailure::Query("database error"),
    }
}
