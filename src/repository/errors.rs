use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures surfaced by any storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("capacity exceeded: {current} stored, {capacity} allowed")]
    CapacityExceeded { current: usize, capacity: usize },
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("remote backend returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("malformed payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RepositoryError {
    /// Whether another backend might succeed where this one failed.
    ///
    /// Missing rows, constraint conflicts and full collections are answers,
    /// not outages.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::NotFound | Self::Conflict(_) | Self::CapacityExceeded { .. }
        )
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation),
                info,
            ) => {
                log::debug!("constraint violation {kind:?}: {}", info.message());
                Self::Conflict(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err = RepositoryError::from(DieselError::NotFound);
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn transport_failures_are_recoverable() {
        assert!(RepositoryError::Unavailable("timeout".into()).is_recoverable());
        assert!(
            RepositoryError::Remote {
                status: 503,
                message: "down".into()
            }
            .is_recoverable()
        );
        assert!(!RepositoryError::Conflict("duplicate".into()).is_recoverable());
        assert!(
            !RepositoryError::CapacityExceeded {
                current: 100,
                capacity: 100
            }
            .is_recoverable()
        );
    }
}
