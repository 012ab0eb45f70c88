use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{
    Comment as DomainComment, NewComment as DomainNewComment, UpdateComment as DomainUpdateComment,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
pub struct Comment {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub body: String,
    pub approved: bool,
    pub pinned: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub body: &'a str,
    pub approved: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::comments)]
pub struct UpdateComment {
    pub approved: Option<bool>,
    pub pinned: Option<bool>,
}

impl From<Comment> for DomainComment {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            body: value.body,
            approved: value.approved,
            pinned: value.pinned,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewComment> for NewComment<'a> {
    fn from(value: &'a DomainNewComment) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            body: value.body.as_str(),
            approved: false,
        }
    }
}

impl From<&DomainUpdateComment> for UpdateComment {
    fn from(value: &DomainUpdateComment) -> Self {
        Self {
            approved: value.approved,
            pinned: value.pinned,
        }
    }
}
