use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::domain::order::ContactDetails;
use crate::pagination::Pagination;

/// Customer record created for every storefront checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    #[serde(flatten)]
    pub contact: ContactDetails,
    pub created_at: NaiveDateTime,
}

/// A checkout joined with the customer that placed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerOrder {
    /// Identifier of the order row.
    pub id: i32,
    pub customer_id: i32,
    pub payment: String,
    pub comments: String,
    pub cart: Cart,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
    pub customer: Customer,
}

/// Payload for a storefront checkout.
///
/// Persisting it creates the customer, the history row and the queue
/// snapshot together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerOrder {
    pub contact: ContactDetails,
    pub payment: String,
    pub comments: String,
    pub cart: Cart,
    pub total_cents: i64,
}

impl NewCustomerOrder {
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

/// Query definition used to list the order history.
#[derive(Debug, Clone, Default)]
pub struct CustomerOrderListQuery {
    /// Optional substring matched against the customer name or phone.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerOrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
