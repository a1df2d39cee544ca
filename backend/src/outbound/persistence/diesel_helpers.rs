//! Shared helpers for the Diesel repository implementations.
//!
//! Maps pool and Diesel failures onto [`RepositoryError`].

use tracing::{debug, warn};

use crate::domain::Aggregate;
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
pub fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(kind, info) => {
            warn!(?kind, constraint = ?info.constraint_name(), "unmapped database error");
            RepositoryError::query("database error")
        }
        _ => RepositoryError::query("database error"),
    }
}

/// Map an insert failure, turning a primary key clash into
/// [`RepositoryError::DuplicateId`].
pub fn map_insert_error<T: Aggregate>(id: T::Id) -> impl FnOnce(diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    move |error| match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::duplicate::<T>(id)
        }
        other => map_diesel_error(other),
    }
}

/// Deduplicated UUIDs for an `eq_any` filter, preserving first occurrence.
pub fn unique_uuids(ids: impl IntoIterator<Item = uuid::Uuid>) -> Vec<uuid::Uuid> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
