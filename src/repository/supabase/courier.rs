use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{HasId, OLDEST_FIRST, Params, SupabaseRepository, id_filter};
use crate::domain::courier::{Courier, CourierListQuery, NewCourier};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CourierReader, CourierWriter};

const TABLE: &str = "couriers";

#[derive(Debug, Deserialize)]
struct CourierRow {
    id: i32,
    name: String,
    vehicle: String,
    available: bool,
    created_at: DateTime<Utc>,
}

impl HasId for CourierRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<CourierRow> for Courier {
    fn from(row: CourierRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            vehicle: row.vehicle,
            available: row.available,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CourierPayload<'a> {
    name: &'a str,
    vehicle: &'a str,
}

impl CourierReader for SupabaseRepository {
    fn list_couriers(&self, query: CourierListQuery) -> RepositoryResult<Vec<Courier>> {
        let mut params: Params = vec![("order", OLDEST_FIRST.to_string())];
        if let Some(available) = query.available {
            params.push(("available", format!("is.{available}")));
        }

        let rows = self.select::<CourierRow>(TABLE, &params)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_courier_by_id(&self, id: i32) -> RepositoryResult<Option<Courier>> {
        let row = self.select_one::<CourierRow>(TABLE, id_filter(id))?;
        Ok(row.map(Into::into))
    }

    fn count_couriers(&self) -> RepositoryResult<usize> {
        self.count(TABLE, Vec::new())
    }
}

impl CourierWriter for SupabaseRepository {
    fn create_courier(&self, new_courier: &NewCourier, capacity: usize) -> RepositoryResult<Courier> {
        self.check_room(TABLE, 1, capacity)?;
        let payload = CourierPayload {
            name: &new_courier.name,
            vehicle: &new_courier.vehicle,
        };
        let row = self.insert_one::<_, CourierRow>(TABLE, &payload)?;
        Ok(row.into())
    }

    fn dequeue_courier(&self) -> RepositoryResult<Option<Courier>> {
        let row = self.take_first::<CourierRow>(TABLE, OLDEST_FIRST, Vec::new())?;
        Ok(row.map(Into::into))
    }

    fn set_courier_availability(&self, id: i32, available: bool) -> RepositoryResult<Courier> {
        self.update::<_, CourierRow>(TABLE, &id_filter(id), &json!({ "available": available }))?
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepositoryError::NotFound)
    }
}
