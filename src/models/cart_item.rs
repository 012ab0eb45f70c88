use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{CartItem as DomainCartItem, CartLine, NewCartItem as DomainNewCartItem};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub id: i32,
    pub session_id: String,
    pub product_id: String,
    pub meta: String,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem<'a> {
    pub session_id: &'a str,
    pub product_id: &'a str,
    pub meta: String,
    pub quantity: i32,
}

impl From<CartItem> for DomainCartItem {
    fn from(value: CartItem) -> Self {
        let line = serde_json::from_str::<CartLine>(&value.meta).unwrap_or_else(|err| {
            log::warn!("cart item {} has malformed meta: {err}", value.id);
            CartLine {
                id: value.product_id.clone(),
                name: value.product_id.clone(),
                price_cents: 0,
                qty: value.quantity,
            }
        });
        Self {
            id: value.id,
            session_id: value.session_id,
            product_id: value.product_id,
            line,
            quantity: value.quantity,
            created_at: value.created_at,
        }
    }
}

impl<'a> NewCartItem<'a> {
    pub fn from_domain(value: &'a DomainNewCartItem) -> Result<Self, serde_json::Error> {
        Ok(Self {
            session_id: value.session_id.as_str(),
            product_id: value.line.id.as_str(),
            meta: serde_json::to_string(&value.line)?,
            quantity: value.quantity(),
        })
    }
}
