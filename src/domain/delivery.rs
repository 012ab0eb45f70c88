use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A scheduled delivery waiting to be dispatched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Delivery {
    pub id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub note: String,
    /// Courier reserved for this delivery, if any.
    pub courier_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Payload required to schedule a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub note: String,
    pub courier_id: Option<i32>,
}

impl NewDelivery {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time,
            note: String::new(),
            courier_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_courier_id(mut self, courier_id: i32) -> Self {
        self.courier_id = Some(courier_id);
        self
    }
}

/// Deliveries only run on working days.
pub fn is_delivery_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A delivery removed from the queue and the courier freed by it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReleasedDelivery {
    pub delivery: Delivery,
    pub courier_restored: Option<i32>,
}
