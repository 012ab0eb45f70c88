use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasId, NEWEST_FIRST, OLDEST_FIRST, Params, SupabaseRepository};
use crate::domain::cart::{CartItem, CartLine, NewCartItem};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CartItemReader, CartItemWriter};

const TABLE: &str = "cart_items";

#[derive(Debug, Deserialize)]
struct CartItemRow {
    id: i32,
    session_id: String,
    product_id: String,
    meta: CartLine,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl HasId for CartItemRow {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            product_id: row.product_id,
            line: row.meta,
            quantity: row.quantity,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CartItemPayload<'a> {
    session_id: &'a str,
    product_id: &'a str,
    meta: &'a CartLine,
    quantity: i32,
}

fn session_filter(session_id: &str) -> Params {
    vec![("session_id", format!("eq.{session_id}"))]
}

impl CartItemReader for SupabaseRepository {
    fn list_cart_items(&self, session_id: &str) -> RepositoryResult<Vec<CartItem>> {
        let mut params = session_filter(session_id);
        params.push(("order", OLDEST_FIRST.to_string()));

        let rows = self.select::<CartItemRow>(TABLE, &params)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl CartItemWriter for SupabaseRepository {
    fn add_cart_item(&self, new_item: &NewCartItem) -> RepositoryResult<CartItem> {
        let payload = CartItemPayload {
            session_id: &new_item.session_id,
            product_id: &new_item.line.id,
            meta: &new_item.line,
            quantity: new_item.quantity(),
        };
        let row = self.insert_one::<_, CartItemRow>(TABLE, &payload)?;
        Ok(row.into())
    }

    fn undo_cart_item(
        &self,
        session_id: &str,
        product_id: Option<&str>,
    ) -> RepositoryResult<Option<CartItem>> {
        let mut filters = session_filter(session_id);
        if let Some(product_id) = product_id {
            filters.push(("product_id", format!("eq.{product_id}")));
        }

        let row = self.take_first::<CartItemRow>(TABLE, NEWEST_FIRST, filters)?;
        Ok(row.map(Into::into))
    }

    fn clear_cart(&self, session_id: &str) -> RepositoryResult<usize> {
        let removed = self.delete::<serde_json::Value>(TABLE, &session_filter(session_id))?;
        Ok(removed.len())
    }
}
