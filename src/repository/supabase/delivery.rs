use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{HasId, OLDEST_FIRST, Params, SupabaseRepository, id_filter};
use crate::domain::delivery::{Delivery, NewDelivery, ReleasedDelivery};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DeliveryReader, DeliveryWriter};

const TABLE: &str = "deliveries";
const COURIERS: &str = "couriers";

#[derive(Debug, Deserialize)]
struct DeliveryRow {
    id: i32,
    date: NaiveDate,
    time: NaiveTime,
    note: String,
    courier_id: Option<i32>,
    created_at: DateTime<Utc>,
}

impl HasId for DeliveryRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<DeliveryRow> for Delivery {
    fn from(row: DeliveryRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            time: row.time,
            note: row.note,
            courier_id: row.courier_id,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DeliveryPayload<'a> {
    date: NaiveDate,
    time: NaiveTime,
    note: &'a str,
    courier_id: Option<i32>,
}

impl SupabaseRepository {
    /// Flip a courier's availability, returning whether a row was updated.
    fn set_available(&self, courier_id: i32, available: bool) -> RepositoryResult<bool> {
        let updated = self.update::<_, serde_json::Value>(
            COURIERS,
            &id_filter(courier_id),
            &json!({ "available": available }),
        )?;
        Ok(!updated.is_empty())
    }

    fn release(&self, row: DeliveryRow) -> RepositoryResult<ReleasedDelivery> {
        let mut courier_restored = None;
        if let Some(courier_id) = row.courier_id {
            if self.set_available(courier_id, true)? {
                courier_restored = Some(courier_id);
            }
        }

        Ok(ReleasedDelivery {
            delivery: row.into(),
            courier_restored,
        })
    }
}

impl DeliveryReader for SupabaseRepository {
    fn list_deliveries(&self) -> RepositoryResult<Vec<Delivery>> {
        let params: Params = vec![("order", OLDEST_FIRST.to_string())];
        let rows = self.select::<DeliveryRow>(TABLE, &params)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_delivery_by_id(&self, id: i32) -> RepositoryResult<Option<Delivery>> {
        let row = self.select_one::<DeliveryRow>(TABLE, id_filter(id))?;
        Ok(row.map(Into::into))
    }

    fn count_deliveries(&self) -> RepositoryResult<usize> {
        self.count(TABLE, Vec::new())
    }
}

impl DeliveryWriter for SupabaseRepository {
    fn schedule_delivery(
        &self,
        new_delivery: &NewDelivery,
        capacity: usize,
    ) -> RepositoryResult<Delivery> {
        if let Some(courier_id) = new_delivery.courier_id {
            let mut params = id_filter(courier_id);
            params.push(("select", "id".to_string()));
            if self.select_one::<serde_json::Value>(COURIERS, params)?.is_none() {
                return Err(RepositoryError::NotFound);
            }
        }
        self.check_room(TABLE, 1, capacity)?;

        let payload = DeliveryPayload {
            date: new_delivery.date,
            time: new_delivery.time,
            note: &new_delivery.note,
            courier_id: new_delivery.courier_id,
        };
        let created = self.insert_one::<_, DeliveryRow>(TABLE, &payload)?;

        if let Some(courier_id) = new_delivery.courier_id {
            if let Err(err) = self.set_available(courier_id, false) {
                self.compensate(TABLE, created.id);
                return Err(err);
            }
        }

        Ok(created.into())
    }

    fn dequeue_delivery(&self) -> RepositoryResult<Option<ReleasedDelivery>> {
        match self.take_first::<DeliveryRow>(TABLE, OLDEST_FIRST, Vec::new())? {
            Some(row) => self.release(row).map(Some),
            None => Ok(None),
        }
    }

    fn complete_delivery(&self, id: i32) -> RepositoryResult<ReleasedDelivery> {
        let row = self
            .delete::<DeliveryRow>(TABLE, &id_filter(id))?
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound)?;

        self.release(row)
    }
}
