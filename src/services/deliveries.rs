use crate::domain::auth::AuthenticatedUser;
use crate::domain::delivery::{Delivery, ReleasedDelivery};
use crate::forms::deliveries::{CompleteDeliveryForm, ScheduleDeliveryForm};
use crate::repository::{DeliveryReader, DeliveryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, when_full};

pub const QUEUE_FULL: &str = "delivery queue is full";

/// Schedule a weekday delivery, reserving its courier when one is given.
pub fn schedule_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ScheduleDeliveryForm,
    capacity: usize,
) -> ServiceResult<Delivery>
where
    R: DeliveryWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_delivery = form
        .into_new_delivery()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.schedule_delivery(&new_delivery, capacity)
        .map_err(when_full(QUEUE_FULL))
}

pub fn list_deliveries<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Delivery>>
where
    R: DeliveryReader + ?Sized,
{
    ensure_admin(user)?;
    repo.list_deliveries().map_err(ServiceError::from)
}

/// Dispatch the oldest delivery and free its courier.
pub fn dequeue_delivery<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ReleasedDelivery>
where
    R: DeliveryWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.dequeue_delivery()
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Mark a specific delivery as done and free its courier.
pub fn complete_delivery<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompleteDeliveryForm,
) -> ServiceResult<ReleasedDelivery>
where
    R: DeliveryWriter + ?Sized,
{
    ensure_admin(user)?;

    let id = form
        .delivery_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let released = repo.complete_delivery(id).map_err(ServiceError::from)?;
    if let Some(courier_id) = released.courier_restored {
        log::info!("delivery {id} completed, courier {courier_id} available again");
    }
    Ok(released)
}
