use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, OLDEST_FIRST, Params, SupabaseRepository};
use crate::domain::cart::Cart;
use crate::domain::order::{ContactDetails, NewOrder, Order};
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderReader, OrderWriter};

pub(super) const TABLE: &str = "orders";

#[derive(Debug, Deserialize)]
pub(super) struct OrderRow {
    id: i32,
    #[serde(flatten)]
    contact: ContactDetails,
    payment: String,
    comments: String,
    #[serde(default)]
    cart: Cart,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl HasId for OrderRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            contact: row.contact,
            payment: row.payment,
            comments: row.comments,
            cart: row.cart,
            total_cents: row.total_cents,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct OrderPayload<'a> {
    #[serde(flatten)]
    pub contact: &'a ContactDetails,
    pub payment: &'a str,
    pub comments: &'a str,
    pub cart: &'a Cart,
    pub total_cents: i64,
}

impl<'a> From<&'a NewOrder> for OrderPayload<'a> {
    fn from(value: &'a NewOrder) -> Self {
        Self {
            contact: &value.contact,
            payment: &value.payment,
            comments: &value.comments,
            cart: &value.cart,
            total_cents: value.total_cents,
        }
    }
}

impl OrderReader for SupabaseRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        let params: Params = vec![("order", OLDEST_FIRST.to_string())];
        let rows = self.select::<OrderRow>(TABLE, &params)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn count_orders(&self) -> RepositoryResult<usize> {
        self.count(TABLE, Vec::new())
    }
}

impl OrderWriter for SupabaseRepository {
    fn enqueue_order(&self, new_order: &NewOrder, capacity: usize) -> RepositoryResult<Order> {
        self.check_room(TABLE, 1, capacity)?;
        let row = self.insert_one::<_, OrderRow>(TABLE, &OrderPayload::from(new_order))?;
        Ok(row.into())
    }

    fn dequeue_order(&self) -> RepositoryResult<Option<Order>> {
        let row = self.take_first::<OrderRow>(TABLE, OLDEST_FIRST, Vec::new())?;
        Ok(row.map(Into::into))
    }
}
