use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;
use thiserror::Error;

use crate::domain::cart::{Cart, CartLine};

/// How a product participates in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Bundle; a cart holds at most one.
    Set,
    /// Add-on sold by quantity.
    Extra,
}

impl ProductKind {
    /// Classify a product id by its prefix (`set-…` or `extra-…`).
    pub fn of(product_id: &str) -> Option<Self> {
        if product_id.starts_with("set-") {
            Some(Self::Set)
        } else if product_id.starts_with("extra-") {
            Some(Self::Extra)
        } else {
            None
        }
    }
}

/// A product offered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ProductKind,
    /// Unit price in centavos.
    pub price_cents: i64,
}

lazy_static! {
    static ref CATALOG: BTreeMap<&'static str, Product> = {
        let products = [
            ("set-c-1", "Set C-1", ProductKind::Set, 88_500),
            ("set-c-2", "Set C-2", ProductKind::Set, 167_500),
            ("set-c-3", "Set C-3", ProductKind::Set, 247_000),
            ("extra-1", "IBB Soap", ProductKind::Extra, 14_800),
            ("extra-2", "Sunshield SPF50", ProductKind::Extra, 28_800),
        ];
        products
            .into_iter()
            .map(|(id, name, kind, price_cents)| {
                (
                    id,
                    Product {
                        id,
                        name,
                        kind,
                        price_cents,
                    },
                )
            })
            .collect()
    };
}

/// Largest quantity a single cart line may carry.
pub const MAX_LINE_QTY: i32 = 99;

/// Errors raised while pricing a cart against the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    #[error("product `{0}` cannot be used as a set")]
    NotASet(String),
    #[error("product `{0}` cannot be used as an extra")]
    NotAnExtra(String),
    #[error("invalid quantity {qty} for product `{id}`")]
    InvalidQuantity { id: String, qty: i32 },
}

/// All products, sets first and then extras, each group ordered by id.
pub fn list_products() -> Vec<Product> {
    let mut products: Vec<Product> = CATALOG.values().cloned().collect();
    products.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.id.cmp(b.id)));
    products
}

pub fn find_product(id: &str) -> Option<&'static Product> {
    CATALOG.get(id)
}

/// Build a cart line for `id` carrying the catalog name and price.
pub fn line_for(id: &str, qty: i32) -> Result<CartLine, CatalogError> {
    let product = find_product(id).ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))?;
    if !(1..=MAX_LINE_QTY).contains(&qty) {
        return Err(CatalogError::InvalidQuantity {
            id: id.to_string(),
            qty,
        });
    }
    let qty = match product.kind {
        ProductKind::Set => 1,
        ProductKind::Extra => qty,
    };
    Ok(CartLine {
        id: product.id.to_string(),
        name: product.name.to_string(),
        price_cents: product.price_cents,
        qty,
    })
}

/// Re-price every line of `cart` from the catalog.
///
/// Client supplied names and prices are discarded. Extras with a zero
/// quantity are dropped and duplicate extras are merged. A merged extra
/// above [`MAX_LINE_QTY`] rejects the whole cart.
pub fn price_cart(cart: &Cart) -> Result<Cart, CatalogError> {
    let mut priced = Cart::default();

    if let Some(set) = cart.set.as_ref() {
        match ProductKind::of(&set.id) {
            Some(ProductKind::Set) => priced.push(line_for(&set.id, 1)?),
            Some(ProductKind::Extra) => return Err(CatalogError::NotASet(set.id.clone())),
            None => return Err(CatalogError::UnknownProduct(set.id.clone())),
        }
    }

    for extra in &cart.extras {
        if extra.qty == 0 {
            continue;
        }
        match ProductKind::of(&extra.id) {
            Some(ProductKind::Extra) => priced.push(line_for(&extra.id, extra.qty)?),
            Some(ProductKind::Set) => return Err(CatalogError::NotAnExtra(extra.id.clone())),
            None => return Err(CatalogError::UnknownProduct(extra.id.clone())),
        }
    }

    if let Some(extra) = priced.extras.iter().find(|extra| extra.qty > MAX_LINE_QTY) {
        return Err(CatalogError::InvalidQuantity {
            id: extra.id.clone(),
            qty: extra.qty,
        });
    }

    Ok(priced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_line(id: &str, price_cents: i64, qty: i32) -> CartLine {
        CartLine {
            id: id.to_string(),
            name: "client name".to_string(),
            price_cents,
            qty,
        }
    }

    #[test]
    fn list_products_orders_sets_before_extras() {
        let ids: Vec<&str> = list_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, ["set-c-1", "set-c-2", "set-c-3", "extra-1", "extra-2"]);
    }

    #[test]
    fn line_for_forces_single_set() {
        let line = line_for("set-c-2", 4).expect("known set");
        assert_eq!(line.qty, 1);
        assert_eq!(line.price_cents, 167_500);
    }

    #[test]
    fn line_for_rejects_unknown_and_non_positive() {
        assert_eq!(
            line_for("set-x", 1),
            Err(CatalogError::UnknownProduct("set-x".to_string()))
        );
        assert!(matches!(
            line_for("extra-1", 0),
            Err(CatalogError::InvalidQuantity { qty: 0, .. })
        ));
    }

    #[test]
    fn price_cart_replaces_client_prices() {
        let cart = Cart {
            set: Some(client_line("set-c-1", 1, 1)),
            extras: vec![
                client_line("extra-1", 1, 2),
                client_line("extra-2", 1, 0),
                client_line("extra-1", 1, 1),
            ],
        };

        let priced = price_cart(&cart).expect("valid cart");

        assert_eq!(priced.set.as_ref().map(|s| s.price_cents), Some(88_500));
        assert_eq!(priced.extras.len(), 1);
        assert_eq!(priced.extras[0].qty, 3);
        assert_eq!(priced.extras[0].name, "IBB Soap");
        assert_eq!(priced.total_cents(), 88_500 + 3 * 14_800);
    }

    #[test]
    fn line_for_rejects_quantity_above_limit() {
        assert!(line_for("extra-1", MAX_LINE_QTY).is_ok());
        assert!(matches!(
            line_for("extra-1", i32::MAX),
            Err(CatalogError::InvalidQuantity { qty: i32::MAX, .. })
        ));
    }

    #[test]
    fn price_cart_rejects_merged_quantity_above_limit() {
        let cart = Cart {
            set: None,
            extras: vec![
                client_line("extra-1", 0, MAX_LINE_QTY),
                client_line("extra-1", 0, 1),
            ],
        };

        assert_eq!(
            price_cart(&cart),
            Err(CatalogError::InvalidQuantity {
                id: "extra-1".to_string(),
                qty: MAX_LINE_QTY + 1,
            })
        );
    }

    #[test]
    fn price_cart_rejects_overflowing_duplicates() {
        let cart = Cart {
            set: None,
            extras: vec![
                client_line("extra-1", 0, i32::MAX),
                client_line("extra-1", 0, 1),
            ],
        };

        assert!(matches!(
            price_cart(&cart),
            Err(CatalogError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn price_cart_rejects_misplaced_products() {
        let cart = Cart {
            set: Some(client_line("extra-1", 0, 1)),
            extras: Vec::new(),
        };
        assert_eq!(
            price_cart(&cart),
            Err(CatalogError::NotASet("extra-1".to_string()))
        );
    }
}
