use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

pub const DEFAULT_AUTHOR: &str = "Guest";

/// Visitor comment shown on the storefront after moderation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub body: String,
    pub approved: bool,
    pub pinned: bool,
    pub created_at: NaiveDateTime,
}

/// Payload for a freshly submitted comment; new comments await approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl NewComment {
    pub fn new(name: Option<String>, email: Option<String>, body: impl Into<String>) -> Self {
        Self {
            name: name
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            email: email.unwrap_or_default(),
            body: body.into(),
        }
    }
}

/// Moderation flags to change on an existing comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateComment {
    pub approved: Option<bool>,
    pub pinned: Option<bool>,
}

impl UpdateComment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn approved(mut self, approved: bool) -> Self {
        self.approved = Some(approved);
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }
}

/// Which comments a listing returns and in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentVisibility {
    /// Approved comments only, pinned first, newest first.
    #[default]
    Public,
    /// Everything, oldest first, for moderation.
    All,
}

#[derive(Debug, Clone, Default)]
pub struct CommentListQuery {
    pub visibility: CommentVisibility,
    pub pagination: Option<Pagination>,
}

impl CommentListQuery {
    pub fn public() -> Self {
        Self {
            visibility: CommentVisibility::Public,
            pagination: None,
        }
    }

    pub fn all() -> Self {
        Self {
            visibility: CommentVisibility::All,
            pagination: None,
        }
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
