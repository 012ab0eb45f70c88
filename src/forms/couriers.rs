use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{empty_string_as_none, sanitize_inline_text, sanitize_optional};
use crate::domain::courier::{CourierListQuery, NewCourier};

const TEXT_MAX_LEN: u64 = 128;

#[derive(Debug, Error)]
pub enum CourierFormError {
    #[error("name required")]
    MissingName,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddCourierForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TEXT_MAX_LEN))]
    pub vehicle: Option<String>,
}

impl AddCourierForm {
    pub fn into_new_courier(self) -> Result<NewCourier, CourierFormError> {
        let name = self
            .name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|name| !name.is_empty())
            .ok_or(CourierFormError::MissingName)?;

        self.validate()?;

        Ok(NewCourier::new(name, sanitize_optional(self.vehicle.as_deref())))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CourierListParams {
    #[serde(default)]
    pub available: Option<bool>,
}

impl From<CourierListParams> for CourierListQuery {
    fn from(params: CourierListParams) -> Self {
        match params.available {
            Some(available) => CourierListQuery::new().available(available),
            None => CourierListQuery::new(),
        }
    }
}
