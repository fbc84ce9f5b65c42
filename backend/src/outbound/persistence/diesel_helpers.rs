//! Error mapping shared by the Diesel adapters.

use tracing::debug;

use crate::domain::ports::DocumentStoreError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub fn map_pool_error(error: PoolError) -> DocumentStoreError {
    DocumentStoreError::connection(error.message())
}

/// Map a Diesel error, logging the failing operation at debug level.
pub fn map_diesel_error(error: diesel::result::Error, operation: &str) -> DocumentStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            DocumentStoreError::connection(format!("{operation}: database connection lost"))
        }
        DieselError::DeserializationError(err) => {
            DocumentStoreError::serialization(format!("{operation}: {err}"))
        }
        other => DocumentStoreError::query(format!("{operation}: {other}")),
    }
}
