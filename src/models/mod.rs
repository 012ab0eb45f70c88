use crate::domain::cart::Cart;

pub mod cart_item;
pub mod comment;
pub mod courier;
pub mod customer;
pub mod delivery;
pub mod order;
pub mod promotion;

/// Decode a stored cart, falling back to an empty cart on malformed JSON.
pub(crate) fn decode_cart(entity: &str, id: i32, raw: &str) -> Cart {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        log::warn!("{entity} {id} has malformed cart json: {err}");
        Cart::default()
    })
}

pub(crate) fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(cart)
}
