use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;

/// Contact and shipping details captured at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal: String,
}

/// An order waiting in the fulfilment queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Payment method, for example `cod`.
    pub payment: String,
    /// Free-form remarks from the customer or the operator.
    pub comments: String,
    /// Priced cart snapshot.
    pub cart: Cart,
    /// Total amount in centavos.
    pub total_cents: i64,
    /// Timestamp that defines the queue position.
    pub created_at: NaiveDateTime,
}

impl Order {
    /// Note pre-filled into the delivery form once the order is accepted.
    pub fn delivery_note(&self) -> String {
        format!(
            "Order #{} — {} — {}",
            self.id, self.contact.fullname, self.contact.address
        )
    }
}

/// Payload required to enqueue a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub contact: ContactDetails,
    pub payment: String,
    pub comments: String,
    pub cart: Cart,
    pub total_cents: i64,
}

impl NewOrder {
    /// Build an order payload whose total is derived from the cart.
    pub fn new(contact: ContactDetails, cart: Cart) -> Self {
        let total_cents = cart.total_cents();
        Self {
            contact,
            payment: String::new(),
            comments: String::new(),
            cart,
            total_cents,
        }
    }

    pub fn with_payment(mut self, payment: impl Into<String>) -> Self {
        self.payment = payment.into();
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Result of accepting the oldest order in the queue.
#[derive(Debug, Clone, Serialize)]
pub struct DequeuedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub delivery_note: String,
}

impl From<Order> for DequeuedOrder {
    fn from(order: Order) -> Self {
        let delivery_note = order.delivery_note();
        Self {
            order,
            delivery_note,
        }
    }
}
