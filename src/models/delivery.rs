use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::domain::delivery::{Delivery as DomainDelivery, NewDelivery as DomainNewDelivery};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::deliveries)]
pub struct Delivery {
    pub id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub note: String,
    pub courier_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deliveries)]
pub struct NewDelivery<'a> {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub note: &'a str,
    pub courier_id: Option<i32>,
}

impl From<Delivery> for DomainDelivery {
    fn from(value: Delivery) -> Self {
        Self {
            id: value.id,
            date: value.date,
            time: value.time,
            note: value.note,
            courier_id: value.courier_id,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewDelivery> for NewDelivery<'a> {
    fn from(value: &'a DomainNewDelivery) -> Self {
        Self {
            date: value.date,
            time: value.time,
            note: value.note.as_str(),
            courier_id: value.courier_id,
        }
    }
}
