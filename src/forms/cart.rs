use serde::Deserialize;
use thiserror::Error;

use super::empty_string_as_none;
use crate::domain::cart::NewCartItem;
use crate::domain::catalog::{CatalogError, line_for};

const SESSION_ID_MAX_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum CartFormError {
    #[error("item required")]
    MissingItem,
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

/// Product picked on the storefront.
#[derive(Debug, Deserialize)]
pub struct CartSelection {
    pub id: String,
    #[serde(default)]
    pub qty: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddCartItemForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub item: Option<CartSelection>,
}

impl AddCartItemForm {
    /// Price the selection from the catalog for the given session.
    pub fn into_new_cart_item(self, session_id: &str) -> Result<NewCartItem, CartFormError> {
        let item = self
            .item
            .filter(|item| !item.id.trim().is_empty())
            .ok_or(CartFormError::MissingItem)?;

        let line = line_for(item.id.trim(), item.qty.unwrap_or(1))?;
        Ok(NewCartItem::new(session_id, line))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UndoCartForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub product_id: Option<String>,
}

/// Explicit session selector accepted by the cart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CartSessionParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub session_id: Option<String>,
}

/// Keep a client supplied session id only when it is short and made of
/// identifier characters.
pub fn normalize_session_id(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    let valid = !value.is_empty()
        && value.len() <= SESSION_ID_MAX_LEN
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    valid.then(|| value.to_string())
}
