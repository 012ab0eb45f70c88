use diesel::dsl::{exists, select};
use diesel::prelude::*;

use crate::{
    domain::delivery::{
        Delivery as DomainDelivery, NewDelivery as DomainNewDelivery, ReleasedDelivery,
    },
    models::delivery::{Delivery as DbDelivery, NewDelivery as DbNewDelivery},
    repository::{
        DeliveryReader, DeliveryWriter, DieselRepository, ensure_room,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl DeliveryReader for DieselRepository {
    fn list_deliveries(&self) -> RepositoryResult<Vec<DomainDelivery>> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;
        let rows = deliveries::table
            .order((deliveries::created_at.asc(), deliveries::id.asc()))
            .load::<DbDelivery>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<DomainDelivery>> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;
        let delivery = deliveries::table
            .find(id)
            .first::<DbDelivery>(&mut conn)
            .optional()?;

        Ok(delivery.map(Into::into))
    }

    fn count_deliveries(&self) -> RepositoryResult<usize> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;
        let total = deliveries::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl DeliveryWriter for DieselRepository {
    fn schedule_delivery(
        &self,
        new_delivery: &DomainNewDelivery,
        capacity: usize,
    ) -> RepositoryResult<DomainDelivery> {
        use crate::schema::{couriers, deliveries};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainDelivery, RepositoryError, _>(|conn| {
            if let Some(courier_id) = new_delivery.courier_id {
                ensure_courier_exists(conn, courier_id)?;
            }

            let scheduled = deliveries::table.count().get_result::<i64>(conn)?;
            ensure_room(scheduled as usize, 1, capacity)?;

            if let Some(courier_id) = new_delivery.courier_id {
                diesel::update(couriers::table.find(courier_id))
                    .set(couriers::available.eq(false))
                    .execute(conn)?;
            }

            let created = diesel::insert_into(deliveries::table)
                .values(DbNewDelivery::from(new_delivery))
                .get_result::<DbDelivery>(conn)?;

            Ok(created.into())
        })
    }

    fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<Option<ReleasedDelivery>, RepositoryError, _>(|conn| {
            let oldest = deliveries::table
                .order((deliveries::created_at.asc(), deliveries::id.asc()))
                .first::<DbDelivery>(conn)
                .optional()?;

            match oldest {
                Some(delivery) => release_delivery(conn, delivery).map(Some),
                None => Ok(None),
            }
        })
    }

    fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery> {
        use crate::schema::deliveries;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<ReleasedDelivery, RepositoryError, _>(|conn| {
            let delivery = deliveries::table
                .find(id)
                .first::<DbDelivery>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            release_delivery(conn, delivery)
        })
    }
}

/// Delete the delivery and mark its courier available again.
fn release_delivery(
    conn: &mut SqliteConnection,
    delivery: DbDelivery,
) -> RepositoryResult<ReleasedDelivery> {
    use crate::schema::{couriers, deliveries};

    diesel::delete(deliveries::table.find(delivery.id)).execute(conn)?;

    let mut courier_restored = None;
    if let Some(courier_id) = delivery.courier_id {
        let updated = diesel::update(couriers::table.find(courier_id))
            .set(couriers::available.eq(true))
            .execute(conn)?;
        if updated > 0 {
            courier_restored = Some(courier_id);
        }
    }

    Ok(ReleasedDelivery {
        delivery: delivery.into(),
        courier_restored,
    })
}

fn ensure_courier_exists(conn: &mut SqliteConnection, courier_id: i32) -> RepositoryResult<()> {
    use crate::schema::couriers;

    let exists: bool =
        select(exists(couriers::table.filter(couriers::id.eq(courier_id)))).get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
