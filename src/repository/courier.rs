use diesel::prelude::*;

use crate::{
    domain::courier::{Courier as DomainCourier, CourierListQuery, NewCourier as DomainNewCourier},
    models::courier::{Courier as DbCourier, NewCourier as DbNewCourier},
    repository::{
        CourierReader, CourierWriter, DieselRepository, ensure_room,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CourierReader for DieselRepository {
    fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<DomainCourier>> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;

        let mut items = couriers::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(available) = query.available {
            items = items.filter(couriers::available.eq(available));
        }

        let rows = items
            .order((couriers::created_at.asc(), couriers::id.asc()))
            .load::<DbCourier>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCourier>> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;
        let courier = couriers::table
            .find(id)
            .first::<DbCourier>(&mut conn)
            .optional()?;

        Ok(courier.map(Into::into))
    }

    fn count_couriers(&self) -> RepositoryResult<usize> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;
        let total = couriers::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl CourierWriter for DieselRepository {
    fn create_courier(
        &self,
        new_courier: &DomainNewCourier,
        capacity: usize,
    ) -> RepositoryResult<DomainCourier> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainCourier, RepositoryError, _>(|conn| {
            let registered = couriers::table.count().get_result::<i64>(conn)?;
            ensure_room(registered as usize, 1, capacity)?;

            let created = diesel::insert_into(couriers::table)
                .values(DbNewCourier::from(new_courier))
                .get_result::<DbCourier>(conn)?;

            Ok(created.into())
        })
    }

    fn dequeue_courier(&self) -> RepositoryResult<Option<DomainCourier>> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<Option<DomainCourier>, RepositoryError, _>(|conn| {
            let oldest = couriers::table
                .order((couriers::created_at.asc(), couriers::id.asc()))
                .first::<DbCourier>(conn)
                .optional()?;

            let Some(oldest) = oldest else {
                return Ok(None);
            };

            diesel::delete(couriers::table.find(oldest.id)).execute(conn)?;

            Ok(Some(oldest.into()))
        })
    }

    fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<DomainCourier> {
        use crate::schema::couriers;

        let mut conn = self.conn()?;
        let updated = diesel::update(couriers::table.find(id))
            .set(couriers::available.eq(available))
            .get_result::<DbCourier>(&mut conn)?;

        Ok(updated.into())
    }
}
