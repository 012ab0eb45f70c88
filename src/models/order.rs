use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::Cart;
use crate::domain::order::{ContactDetails, NewOrder as DomainNewOrder, Order as DomainOrder};
use crate::models::{decode_cart, encode_cart};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal: String,
    pub payment: String,
    pub comments: String,
    pub cart_json: String,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub fullname: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub postal: &'a str,
    pub payment: &'a str,
    pub comments: &'a str,
    pub cart_json: String,
    pub total_cents: i64,
}

impl From<Order> for DomainOrder {
    fn from(value: Order) -> Self {
        let cart = decode_cart("order", value.id, &value.cart_json);
        Self {
            id: value.id,
            contact: ContactDetails {
                fullname: value.fullname,
                phone: value.phone,
                email: value.email,
                address: value.address,
                city: value.city,
                postal: value.postal,
            },
            payment: value.payment,
            comments: value.comments,
            cart,
            total_cents: value.total_cents,
            created_at: value.created_at,
        }
    }
}

impl<'a> NewOrder<'a> {
    pub fn from_domain(value: &'a DomainNewOrder) -> Result<Self, serde_json::Error> {
        Self::from_parts(
            &value.contact,
            &value.payment,
            &value.comments,
            &value.cart,
            value.total_cents,
        )
    }

    /// Build a queue row from checkout fields shared with the order history.
    pub fn from_parts(
        contact: &'a ContactDetails,
        payment: &'a str,
        comments: &'a str,
        cart: &Cart,
        total_cents: i64,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            fullname: contact.fullname.as_str(),
            phone: contact.phone.as_str(),
            email: contact.email.as_str(),
            address: contact.address.as_str(),
            city: contact.city.as_str(),
            postal: contact.postal.as_str(),
            payment,
            comments,
            cart_json: encode_cart(cart)?,
            total_cents,
        })
    }
}
