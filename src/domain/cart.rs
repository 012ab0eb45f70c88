use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::ProductKind;

/// A product line inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Unit price in centavos.
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default = "default_qty")]
    pub qty: i32,
}

fn default_qty() -> i32 {
    1
}

/// Cart contents: at most one set plus any number of extras.
///
/// Extras keep insertion order so the most recent addition can be undone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub set: Option<CartLine>,
    #[serde(default)]
    pub extras: Vec<CartLine>,
}

impl Cart {
    /// Add a line: sets replace the current set, extras merge by id.
    ///
    /// Merged quantities saturate at `i32::MAX`.
    pub fn push(&mut self, line: CartLine) {
        if ProductKind::of(&line.id) == Some(ProductKind::Set) {
            self.set = Some(line);
            return;
        }

        match self.extras.iter_mut().find(|extra| extra.id == line.id) {
            Some(existing) => existing.qty = existing.qty.saturating_add(line.qty),
            None => self.extras.push(line),
        }
    }

    /// Remove the most recently appended extra.
    pub fn undo(&mut self) -> Option<CartLine> {
        self.extras.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_none() && self.extras.is_empty()
    }

    pub fn total_cents(&self) -> i64 {
        let set_total = self
            .set
            .as_ref()
            .map(|set| set.price_cents)
            .unwrap_or_default();
        let extras_total: i64 = self
            .extras
            .iter()
            .map(|extra| extra.price_cents * i64::from(extra.qty))
            .sum();
        set_total + extras_total
    }

    /// Rebuild a cart from persisted items, oldest first.
    ///
    /// Extras with the same id are summed and the latest set wins.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Self {
        let mut cart = Self::default();
        for item in items {
            let mut line = item.line.clone();
            line.qty = item.quantity;
            cart.push(line);
        }
        cart
    }
}

/// Cart with its computed total, as returned to the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    #[serde(flatten)]
    pub cart: Cart,
    pub total_cents: i64,
}

impl From<Cart> for CartSummary {
    fn from(cart: Cart) -> Self {
        let total_cents = cart.total_cents();
        Self { cart, total_cents }
    }
}

/// A product reference persisted for an anonymous storefront session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    pub id: i32,
    pub session_id: String,
    pub product_id: String,
    /// Snapshot of the line at the time it was added.
    pub line: CartLine,
    pub quantity: i32,
    pub created_at: NaiveDateTime,
}

/// Payload required to persist a cart item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub session_id: String,
    pub line: CartLine,
}

impl NewCartItem {
    pub fn new(session_id: impl Into<String>, line: CartLine) -> Self {
        Self {
            session_id: session_id.into(),
            line,
        }
    }

    pub fn quantity(&self) -> i32 {
        self.line.qty.max(1)
    }
}
