use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, NEWEST_FIRST, Params, SupabaseRepository, id_filter};
use crate::domain::promotion::{NewPromotion, Promotion};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{PromotionReader, PromotionWriter};

const TABLE: &str = "promotions";

#[derive(Debug, Deserialize)]
struct PromotionRow {
    id: i32,
    title: String,
    link: String,
    created_at: DateTime<Utc>,
}

impl HasId for PromotionRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<PromotionRow> for Promotion {
    fn from(row: PromotionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            link: row.link,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PromotionPayload<'a> {
    title: &'a str,
    link: &'a str,
}

impl<'a> From<&'a NewPromotion> for PromotionPayload<'a> {
    fn from(value: &'a NewPromotion) -> Self {
        Self {
            title: &value.title,
            link: &value.link,
        }
    }
}

impl PromotionReader for SupabaseRepository {
    fn list_promotions(&self) -> RepositoryResult<Vec<Promotion>> {
        let params: Params = vec![("order", NEWEST_FIRST.to_string())];
        let rows = self.select::<PromotionRow>(TABLE, &params)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_promotions(&self) -> RepositoryResult<usize> {
        self.count(TABLE, Vec::new())
    }
}

impl PromotionWriter for SupabaseRepository {
    fn create_promotion(
        &self,
        new_promotion: &NewPromotion,
        capacity: usize,
    ) -> RepositoryResult<Promotion> {
        self.check_room(TABLE, 1, capacity)?;
        let row =
            self.insert_one::<_, PromotionRow>(TABLE, &PromotionPayload::from(new_promotion))?;
        Ok(row.into())
    }

    /// A bulk insert is a single statement in PostgREST, so it lands
    /// atomically.
    fn create_promotions(
        &self,
        new_promotions: &[NewPromotion],
        capacity: usize,
    ) -> RepositoryResult<usize> {
        if new_promotions.is_empty() {
            return Ok(0);
        }
        self.check_room(TABLE, new_promotions.len(), capacity)?;

        let payload: Vec<PromotionPayload> = new_promotions.iter().map(Into::into).collect();
        let rows = self.insert::<_, PromotionRow>(TABLE, &payload)?;
        Ok(rows.len())
    }

    fn pop_promotion(&self) -> RepositoryResult<Option<Promotion>> {
        let row = self.take_first::<PromotionRow>(TABLE, NEWEST_FIRST, Vec::new())?;
        Ok(row.map(Into::into))
    }

    fn delete_promotion(&self, id: i32) -> RepositoryResult<()> {
        let removed = self.delete::<PromotionRow>(TABLE, &id_filter(id))?;
        if removed.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
