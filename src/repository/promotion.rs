use diesel::prelude::*;

use crate::{
    domain::promotion::{NewPromotion as DomainNewPromotion, Promotion as DomainPromotion},
    models::promotion::{NewPromotion as DbNewPromotion, Promotion as DbPromotion},
    repository::{
        DieselRepository, PromotionReader, PromotionWriter, ensure_room,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl PromotionReader for DieselRepository {
    fn list_promotions(&self) -> RepositoryResult<Vec<DomainPromotion>> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let rows = promotions::table
            .order((promotions::created_at.desc(), promotions::id.desc()))
            .load::<DbPromotion>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_promotions(&self) -> RepositoryResult<usize> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let total = promotions::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl PromotionWriter for DieselRepository {
    fn create_promotion(
        &self,
        new_promotion: &DomainNewPromotion,
        capacity: usize,
    ) -> RepositoryResult<DomainPromotion> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainPromotion, RepositoryError, _>(|conn| {
            let stacked = promotions::table.count().get_result::<i64>(conn)?;
            ensure_room(stacked as usize, 1, capacity)?;

            let created = diesel::insert_into(promotions::table)
                .values(DbNewPromotion::from(new_promotion))
                .get_result::<DbPromotion>(conn)?;

            Ok(created.into())
        })
    }

    fn create_promotions(
        &self,
        new_promotions: &[DomainNewPromotion],
        capacity: usize,
    ) -> RepositoryResult<usize> {
        use crate::schema::promotions;

        if new_promotions.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewPromotion> = new_promotions.iter().map(Into::into).collect();

        conn.immediate_transaction::<usize, RepositoryError, _>(|conn| {
            let stacked = promotions::table.count().get_result::<i64>(conn)?;
            ensure_room(stacked as usize, rows.len(), capacity)?;

            let inserted = diesel::insert_into(promotions::table)
                .values(&rows)
                .execute(conn)?;
            Ok(inserted)
        })
    }

    fn pop_promotion(&self) -> RepositoryResult<Option<DomainPromotion>> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<Option<DomainPromotion>, RepositoryError, _>(|conn| {
            let newest = promotions::table
                .order((promotions::created_at.desc(), promotions::id.desc()))
                .first::<DbPromotion>(conn)
                .optional()?;

            let Some(newest) = newest else {
                return Ok(None);
            };

            diesel::delete(promotions::table.find(newest.id)).execute(conn)?;

            Ok(Some(newest.into()))
        })
    }

    fn delete_promotion(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::promotions;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(promotions::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
