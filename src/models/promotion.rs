use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::promotion::{NewPromotion as DomainNewPromotion, Promotion as DomainPromotion};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct Promotion {
    pub id: i32,
    pub title: String,
    pub link: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct NewPromotion<'a> {
    pub title: &'a str,
    pub link: &'a str,
}

impl From<Promotion> for DomainPromotion {
    fn from(value: Promotion) -> Self {
        Self {
            id: value.id,
            title: value.title,
            link: value.link,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPromotion> for NewPromotion<'a> {
    fn from(value: &'a DomainNewPromotion) -> Self {
        Self {
            title: value.title.as_str(),
            link: value.link.as_str(),
        }
    }
}
