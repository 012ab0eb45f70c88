use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{empty_string_as_none, sanitize_inline_text, sanitize_optional};
use crate::domain::cart::{Cart, CartLine};
use crate::domain::catalog::{CatalogError, price_cart};
use crate::domain::customer::NewCustomerOrder;
use crate::domain::order::{ContactDetails, NewOrder};

const TEXT_MAX_LEN: u64 = 256;
const COMMENTS_MAX_LEN: u64 = 2000;
pub const DEFAULT_PAYMENT: &str = "cod";
pub const ADMIN_ORDER_COMMENT: &str = "(admin)";

pub type OrderFormResult<T> = Result<T, OrderFormError>;

#[derive(Debug, Error)]
pub enum OrderFormError {
    #[error("fullname and address are required")]
    MissingContact,
    #[error("fullname, phone and address are required")]
    MissingQuickOrderContact,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

/// Checkout submitted from the storefront.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PlaceOrderForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = COMMENTS_MAX_LEN))]
    pub comments: Option<String>,
    /// Client cart; only ids and quantities are trusted.
    #[serde(default)]
    pub cart: Cart,
}

impl PlaceOrderForm {
    pub fn into_new_customer_order(self) -> OrderFormResult<NewCustomerOrder> {
        let fullname = sanitize_optional(self.fullname.as_deref());
        let address = sanitize_optional(self.address.as_deref());
        if fullname.is_empty() || address.is_empty() {
            return Err(OrderFormError::MissingContact);
        }

        self.validate()?;

        let contact = ContactDetails {
            fullname,
            phone: sanitize_optional(self.phone.as_deref()),
            email: sanitize_optional(self.email.as_deref()).to_lowercase(),
            address,
            city: sanitize_optional(self.city.as_deref()),
            postal: sanitize_optional(self.postal.as_deref()),
        };
        let cart = price_cart(&self.cart)?;

        Ok(NewCustomerOrder::new(contact, cart)
            .with_payment(payment_or_default(self.payment.as_deref()))
            .with_comments(self.comments.as_deref().map(str::trim).unwrap_or_default()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtraSelection {
    pub id: String,
    #[serde(default = "default_qty")]
    pub qty: i32,
}

fn default_qty() -> i32 {
    1
}

/// Order keyed in by an operator from the back office.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuickOrderForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub set_id: Option<String>,
    #[serde(default)]
    pub extras: Vec<ExtraSelection>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = COMMENTS_MAX_LEN))]
    pub comments: Option<String>,
}

impl QuickOrderForm {
    pub fn into_new_order(self) -> OrderFormResult<NewOrder> {
        let fullname = sanitize_optional(self.fullname.as_deref());
        let phone = sanitize_optional(self.phone.as_deref());
        let address = sanitize_optional(self.address.as_deref());
        if fullname.is_empty() || phone.is_empty() || address.is_empty() {
            return Err(OrderFormError::MissingQuickOrderContact);
        }

        self.validate()?;

        let mut requested = Cart::default();
        if let Some(set_id) = self.set_id.as_deref() {
            requested.set = Some(selection(set_id.trim(), 1));
        }
        requested.extras = self
            .extras
            .iter()
            .filter(|extra| !extra.id.trim().is_empty())
            .map(|extra| selection(extra.id.trim(), extra.qty))
            .collect();

        let cart = price_cart(&requested)?;

        let contact = ContactDetails {
            fullname,
            phone,
            email: sanitize_optional(self.email.as_deref()).to_lowercase(),
            address,
            city: sanitize_optional(self.city.as_deref()),
            postal: sanitize_optional(self.postal.as_deref()),
        };

        let comments = self
            .comments
            .as_deref()
            .map(str::trim)
            .unwrap_or(ADMIN_ORDER_COMMENT);

        Ok(NewOrder::new(contact, cart)
            .with_payment(payment_or_default(self.payment.as_deref()))
            .with_comments(comments))
    }
}

fn selection(id: &str, qty: i32) -> CartLine {
    CartLine {
        id: id.to_string(),
        name: String::new(),
        price_cents: 0,
        qty,
    }
}

fn payment_or_default(payment: Option<&str>) -> String {
    payment
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_PAYMENT.to_string())
}
