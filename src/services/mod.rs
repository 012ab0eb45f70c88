use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;

pub mod errors;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod comments;
pub mod couriers;
pub mod deliveries;
pub mod orders;
pub mod promotions;

pub use errors::{ServiceError, ServiceResult};

/// Reject users that lack the back-office role.
pub(crate) fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.has_role(SERVICE_ACCESS_ROLE) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Map a storage error, reporting a full queue or stack as `message`.
pub(crate) fn when_full(message: &'static str) -> impl Fn(RepositoryError) -> ServiceError {
    move |err| match err {
        RepositoryError::CapacityExceeded { current, capacity } => {
            log::info!("{message} ({current}/{capacity})");
            ServiceError::Conflict(message.to_string())
        }
        other => other.into(),
    }
}
