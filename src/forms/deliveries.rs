use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{empty_string_as_none, sanitize_optional};
use crate::domain::delivery::{NewDelivery, is_delivery_day};

const NOTE_MAX_LEN: u64 = 500;

#[derive(Debug, Error)]
pub enum DeliveryFormError {
    #[error("date and time required")]
    MissingSchedule,
    #[error("date must be YYYY-MM-DD and time HH:MM")]
    InvalidSchedule,
    #[error("deliveries are allowed Monday to Friday")]
    Weekend,
    #[error("delivery id required")]
    MissingId,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScheduleDeliveryForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = NOTE_MAX_LEN))]
    pub note: Option<String>,
    #[serde(default)]
    pub courier_id: Option<i32>,
}

impl ScheduleDeliveryForm {
    pub fn into_new_delivery(self) -> Result<NewDelivery, DeliveryFormError> {
        let (Some(date), Some(time)) = (self.date.as_deref(), self.time.as_deref()) else {
            return Err(DeliveryFormError::MissingSchedule);
        };

        self.validate()?;

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| DeliveryFormError::InvalidSchedule)?;
        let time = parse_time(time.trim()).ok_or(DeliveryFormError::InvalidSchedule)?;

        if !is_delivery_day(date) {
            return Err(DeliveryFormError::Weekend);
        }

        let mut delivery =
            NewDelivery::new(date, time).with_note(sanitize_optional(self.note.as_deref()));
        if let Some(courier_id) = self.courier_id {
            delivery = delivery.with_courier_id(courier_id);
        }
        Ok(delivery)
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteDeliveryForm {
    #[serde(default)]
    pub id: Option<i32>,
}

impl CompleteDeliveryForm {
    /// Ids are positive; zero or a negative id counts as missing.
    pub fn delivery_id(&self) -> Result<i32, DeliveryFormError> {
        self.id.filter(|id| *id > 0).ok_or(DeliveryFormError::MissingId)
    }
}
