use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerOrder as DomainCustomerOrder,
    NewCustomerOrder as DomainNewCustomerOrder,
};
use crate::domain::order::ContactDetails;
use crate::models::{decode_cart, encode_cart};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::customer_orders)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
pub struct CustomerOrder {
    pub id: i32,
    pub customer_id: i32,
    pub payment: String,
    pub comments: String,
    pub cart_json: String,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub fullname: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub postal: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customer_orders)]
pub struct NewCustomerOrder<'a> {
    pub customer_id: i32,
    pub payment: &'a str,
    pub comments: &'a str,
    pub cart_json: String,
    pub total_cents: i64,
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
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
            created_at: value.created_at,
        }
    }
}

impl From<(CustomerOrder, Customer)> for DomainCustomerOrder {
    fn from((order, customer): (CustomerOrder, Customer)) -> Self {
        let cart = decode_cart("customer order", order.id, &order.cart_json);
        Self {
            id: order.id,
            customer_id: order.customer_id,
            payment: order.payment,
            comments: order.comments,
            cart,
            total_cents: order.total_cents,
            created_at: order.created_at,
            customer: customer.into(),
        }
    }
}

impl<'a> From<&'a ContactDetails> for NewCustomer<'a> {
    fn from(value: &'a ContactDetails) -> Self {
        Self {
            fullname: value.fullname.as_str(),
            phone: value.phone.as_str(),
            email: value.email.as_str(),
            address: value.address.as_str(),
            city: value.city.as_str(),
            postal: value.postal.as_str(),
        }
    }
}

impl<'a> NewCustomerOrder<'a> {
    pub fn from_domain(
        customer_id: i32,
        value: &'a DomainNewCustomerOrder,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            customer_id,
            payment: value.payment.as_str(),
            comments: value.comments.as_str(),
            cart_json: encode_cart(&value.cart)?,
            total_cents: value.total_cents,
        })
    }
}
