use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Courier on the dispatch roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Courier {
    pub id: i32,
    pub name: String,
    pub vehicle: String,
    /// `false` while the courier is assigned to a delivery.
    pub available: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourier {
    pub name: String,
    pub vehicle: String,
}

impl NewCourier {
    pub fn new(name: impl Into<String>, vehicle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vehicle: vehicle.into(),
        }
    }
}

/// Query definition used to list couriers, oldest first.
#[derive(Debug, Clone, Default)]
pub struct CourierListQuery {
    pub available: Option<bool>,
}

impl CourierListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }
}
