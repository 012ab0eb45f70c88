use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Banner shown in the storefront promotions carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Promotion {
    pub id: i32,
    pub title: String,
    pub link: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromotion {
    pub title: String,
    pub link: String,
}

impl NewPromotion {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}
