use crate::domain::auth::AuthenticatedUser;
use crate::domain::courier::Courier;
use crate::forms::couriers::{AddCourierForm, CourierListParams};
use crate::repository::{CourierReader, CourierWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, when_full};

pub const QUEUE_FULL: &str = "courier queue is full";

pub fn add_courier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCourierForm,
    capacity: usize,
) -> ServiceResult<Courier>
where
    R: CourierWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_courier = form
        .into_new_courier()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_courier(&new_courier, capacity)
        .map_err(when_full(QUEUE_FULL))
}

/// Couriers oldest first, optionally only the available ones.
pub fn list_couriers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CourierListParams,
) -> ServiceResult<Vec<Courier>>
where
    R: CourierReader + ?Sized,
{
    ensure_admin(user)?;
    repo.list_couriers(params.into())
        .map_err(ServiceError::from)
}

pub fn dequeue_courier<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Courier>
where
    R: CourierWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.dequeue_courier()
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockCouriers;
    use crate::services::test_support::{admin, timestamp};

    fn courier(id: i32, available: bool) -> Courier {
        Courier {
            id,
            name: "Jomar".to_string(),
            vehicle: "Motorbike".to_string(),
            available,
            created_at: timestamp(),
        }
    }

    #[test]
    fn add_requires_name() {
        let mut repo = MockCouriers::new();
        repo.expect_create_courier().never();

        assert!(matches!(
            add_courier(&repo, &admin(), AddCourierForm::default(), 100),
            Err(ServiceError::Form(message)) if message == "name required"
        ));
    }

    #[test]
    fn add_respects_capacity() {
        let mut repo = MockCouriers::new();
        repo.expect_create_courier().returning(|_, _| {
            Err(RepositoryError::CapacityExceeded {
                current: 100,
                capacity: 100,
            })
        });

        let form = AddCourierForm {
            name: Some("Jomar".to_string()),
            vehicle: None,
        };

        assert!(matches!(
            add_courier(&repo, &admin(), form, 100),
            Err(ServiceError::Conflict(message)) if message == QUEUE_FULL
        ));
    }

    #[test]
    fn list_forwards_availability_filter() {
        let mut repo = MockCouriers::new();
        repo.expect_list_couriers()
            .withf(|query| query.available == Some(true))
            .returning(|_| Ok(vec![courier(1, true)]));

        let couriers = list_couriers(
            &repo,
            &admin(),
            CourierListParams {
                available: Some(true),
            },
        )
        .unwrap();

        assert_eq!(couriers.len(), 1);
    }

    #[test]
    fn dequeue_returns_oldest_courier() {
        let mut repo = MockCouriers::new();
        repo.expect_dequeue_courier()
            .returning(|| Ok(Some(courier(1, true))));

        assert_eq!(dequeue_courier(&repo, &admin()).unwrap().id, 1);
    }

    #[test]
    fn dequeue_on_empty_roster_is_not_found() {
        let mut repo = MockCouriers::new();
        repo.expect_dequeue_courier().returning(|| Ok(None));

        assert!(matches!(
            dequeue_courier(&repo, &admin()),
            Err(ServiceError::NotFound)
        ));
    }
}
