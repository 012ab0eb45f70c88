use crate::domain::auth::AuthenticatedUser;
use crate::domain::promotion::Promotion;
use crate::forms::promotions::{AddPromotionForm, UploadPromotionsForm};
use crate::repository::{PromotionReader, PromotionWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin, when_full};

pub const STACK_FULL: &str = "promotion stack is full";

pub fn list_promotions<R>(repo: &R) -> ServiceResult<Vec<Promotion>>
where
    R: PromotionReader + ?Sized,
{
    repo.list_promotions().map_err(ServiceError::from)
}

pub fn add_promotion<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddPromotionForm,
    capacity: usize,
) -> ServiceResult<Promotion>
where
    R: PromotionWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_promotion = form
        .into_new_promotion()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_promotion(&new_promotion, capacity)
        .map_err(when_full(STACK_FULL))
}

/// Remove and return the most recently added promotion.
pub fn pop_promotion<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Promotion>
where
    R: PromotionWriter + ?Sized,
{
    ensure_admin(user)?;

    repo.pop_promotion()
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn remove_promotion<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: PromotionWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_promotion(id).map_err(ServiceError::from)
}

/// Bulk insert promotions from an uploaded CSV.
///
/// The whole file is refused when it would push the stack past capacity.
pub fn import_promotions<R>(
    repo: &R,
    user: &AuthenticatedUser,
    mut form: UploadPromotionsForm,
    capacity: usize,
) -> ServiceResult<usize>
where
    R: PromotionWriter + ?Sized,
{
    ensure_admin(user)?;

    let promotions = form
        .parse()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let inserted = repo
        .create_promotions(&promotions, capacity)
        .map_err(when_full(STACK_FULL))?;
    log::info!("imported {inserted} promotions");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use actix_multipart::form::tempfile::TempFile;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockPromotions;
    use crate::services::test_support::{admin, timestamp, visitor};

    fn promotion(id: i32) -> Promotion {
        Promotion {
            id,
            title: "Summer glow".to_string(),
            link: "https://beupro.ph/summer".to_string(),
            created_at: timestamp(),
        }
    }

    fn upload(csv: &str) -> UploadPromotionsForm {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        UploadPromotionsForm {
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("promotions.csv".to_string()),
                size: csv.len(),
            },
        }
    }

    #[test]
    fn listing_is_public() {
        let mut repo = MockPromotions::new();
        repo.expect_list_promotions()
            .returning(|| Ok(vec![promotion(2), promotion(1)]));

        assert_eq!(list_promotions(&repo).unwrap().len(), 2);
    }

    #[test]
    fn add_requires_title_and_link() {
        let mut repo = MockPromotions::new();
        repo.expect_create_promotion().never();

        let form = AddPromotionForm {
            title: Some("Sale".to_string()),
            link: None,
        };

        assert!(matches!(
            add_promotion(&repo, &admin(), form, 100),
            Err(ServiceError::Form(message)) if message == "title and link required"
        ));
    }

    #[test]
    fn add_respects_capacity() {
        let mut repo = MockPromotions::new();
        repo.expect_create_promotion().returning(|_, _| {
            Err(RepositoryError::CapacityExceeded {
                current: 5,
                capacity: 5,
            })
        });

        let form = AddPromotionForm {
            title: Some("Sale".to_string()),
            link: Some("https://beupro.ph/sale".to_string()),
        };

        assert!(matches!(
            add_promotion(&repo, &admin(), form, 5),
            Err(ServiceError::Conflict(message)) if message == STACK_FULL
        ));
    }

    #[test]
    fn pop_on_empty_stack_is_not_found() {
        let mut repo = MockPromotions::new();
        repo.expect_pop_promotion().returning(|| Ok(None));

        assert!(matches!(
            pop_promotion(&repo, &admin()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn pop_requires_admin() {
        let mut repo = MockPromotions::new();
        repo.expect_pop_promotion().never();

        assert!(matches!(
            pop_promotion(&repo, &visitor()),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn import_inserts_usable_rows() {
        let mut repo = MockPromotions::new();
        repo.expect_create_promotions()
            .withf(|rows, capacity| rows.len() == 2 && rows[1].title == "Rainy day" && *capacity == 100)
            .returning(|rows, _| Ok(rows.len()));

        let form = upload("title,link\nSummer,https://a.ph\n,https://b.ph\nRainy day,https://c.ph\n");

        assert_eq!(import_promotions(&repo, &admin(), form, 100).unwrap(), 2);
    }

    #[test]
    fn import_refuses_overflowing_upload() {
        let mut repo = MockPromotions::new();
        repo.expect_create_promotions().returning(|_, _| {
            Err(RepositoryError::CapacityExceeded {
                current: 4,
                capacity: 5,
            })
        });

        let form = upload("title,link\nA,https://a.ph\nB,https://b.ph\n");

        assert!(matches!(
            import_promotions(&repo, &admin(), form, 5),
            Err(ServiceError::Conflict(message)) if message == STACK_FULL
        ));
    }

    #[test]
    fn import_without_rows_is_a_form_error() {
        let repo = MockPromotions::new();

        assert!(matches!(
            import_promotions(&repo, &admin(), upload("title,link\n"), 100),
            Err(ServiceError::Form(message)) if message == "upload contains no promotions"
        ));
    }
}
