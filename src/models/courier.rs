use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::courier::{Courier as DomainCourier, NewCourier as DomainNewCourier};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::couriers)]
pub struct Courier {
    pub id: i32,
    pub name: String,
    pub vehicle: String,
    pub available: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::couriers)]
pub struct NewCourier<'a> {
    pub name: &'a str,
    pub vehicle: &'a str,
}

impl From<Courier> for DomainCourier {
    fn from(value: Courier) -> Self {
        Self {
            id: value.id,
            name: value.name,
            vehicle: value.vehicle,
            available: value.available,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewCourier> for NewCourier<'a> {
    fn from(value: &'a DomainNewCourier) -> Self {
        Self {
            name: value.name.as_str(),
            vehicle: value.vehicle.as_str(),
        }
    }
}
