use diesel::prelude::*;

use crate::{
    domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder},
    models::order::{NewOrder as DbNewOrder, Order as DbOrder},
    repository::{
        DieselRepository, OrderReader, OrderWriter, ensure_room,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl OrderReader for DieselRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let rows = orders::table
            .order((orders::created_at.asc(), orders::id.asc()))
            .load::<DbOrder>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_orders(&self) -> RepositoryResult<usize> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let total = orders::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl OrderWriter for DieselRepository {
    fn enqueue_order(
        &self,
        new_order: &DomainNewOrder,
        capacity: usize,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_new = DbNewOrder::from_domain(new_order)?;

        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let queued = orders::table.count().get_result::<i64>(conn)?;
            ensure_room(queued as usize, 1, capacity)?;

            let created = diesel::insert_into(orders::table)
                .values(&db_new)
                .get_result::<DbOrder>(conn)?;

            Ok(created.into())
        })
    }

    fn dequeue_order(&self) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<Option<DomainOrder>, RepositoryError, _>(|conn| {
            let oldest = orders::table
                .order((orders::created_at.asc(), orders::id.asc()))
                .first::<DbOrder>(conn)
                .optional()?;

            let Some(oldest) = oldest else {
                return Ok(None);
            };

            diesel::delete(orders::table.find(oldest.id)).execute(conn)?;

            Ok(Some(oldest.into()))
        })
    }
}
