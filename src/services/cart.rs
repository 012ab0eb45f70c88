use crate::domain::cart::{Cart, CartItem, CartSummary};
use crate::domain::catalog::{CatalogError, MAX_LINE_QTY, ProductKind};
use crate::forms::cart::{AddCartItemForm, UndoCartForm};
use crate::repository::{CartItemReader, CartItemWriter};
use crate::services::{ServiceError, ServiceResult};

/// Price the selected product and store it against the session.
///
/// Extras already in the cart count towards the per-line quantity limit.
pub fn add_item<R>(repo: &R, session_id: &str, form: AddCartItemForm) -> ServiceResult<CartItem>
where
    R: CartItemReader + CartItemWriter + ?Sized,
{
    let new_item = form
        .into_new_cart_item(session_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let stored: i64 = repo
        .list_cart_items(session_id)
        .map_err(ServiceError::from)?
        .iter()
        .filter(|item| item.product_id == new_item.line.id)
        .map(|item| i64::from(item.quantity))
        .sum();
    let merged = stored + i64::from(new_item.quantity());
    let is_extra = ProductKind::of(&new_item.line.id) == Some(ProductKind::Extra);
    if is_extra && merged > i64::from(MAX_LINE_QTY) {
        let err = CatalogError::InvalidQuantity {
            id: new_item.line.id.clone(),
            qty: i32::try_from(merged).unwrap_or(i32::MAX),
        };
        return Err(ServiceError::Form(err.to_string()));
    }

    repo.add_cart_item(&new_item).map_err(ServiceError::from)
}

/// Aggregate the session's stored items into a cart with its total.
pub fn load_cart<R>(repo: &R, session_id: &str) -> ServiceResult<CartSummary>
where
    R: CartItemReader + ?Sized,
{
    let items = repo.list_cart_items(session_id).map_err(ServiceError::from)?;
    Ok(Cart::from_items(&items).into())
}

/// Remove the newest item of the session; `NotFound` when nothing is left.
pub fn undo_item<R>(repo: &R, session_id: &str, form: UndoCartForm) -> ServiceResult<CartItem>
where
    R: CartItemWriter + ?Sized,
{
    repo.undo_cart_item(session_id, form.product_id.as_deref().map(str::trim))
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn clear_cart<R>(repo: &R, session_id: &str) -> ServiceResult<usize>
where
    R: CartItemWriter + ?Sized,
{
    repo.clear_cart(session_id).map_err(ServiceError::from)
}
