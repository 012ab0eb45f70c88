use crate::domain::catalog::{Product, list_products};

/// Products offered on the storefront, sets first.
pub fn load_products() -> Vec<Product> {
    list_products()
}
