use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OLDEST_FIRST, Params, SupabaseRepository, id_filter};
use crate::domain::comment::{
    Comment, CommentListQuery, CommentVisibility, NewComment, UpdateComment,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CommentReader, CommentWriter};

const TABLE: &str = "comments";
const PUBLIC_ORDER: &str = "pinned.desc,created_at.desc,id.desc";

#[derive(Debug, Deserialize)]
struct CommentRow {
    id: i32,
    name: String,
    email: String,
    body: String,
    approved: bool,
    pinned: bool,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            body: row.body,
            approved: row.approved,
            pinned: row.pinned,
            created_at: row.created_at.naive_utc(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CommentPayload<'a> {
    name: &'a str,
    email: &'a str,
    body: &'a str,
    approved: bool,
}

#[derive(Debug, Serialize)]
struct CommentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinned: Option<bool>,
}

impl CommentReader for SupabaseRepository {
    fn list_comments(&self, query: CommentListQuery) -> RepositoryResult<(usize, Vec<Comment>)> {
        let mut params: Params = match query.visibility {
            CommentVisibility::Public => vec![
                ("approved", "is.true".to_string()),
                ("order", PUBLIC_ORDER.to_string()),
            ],
            CommentVisibility::All => vec![("order", OLDEST_FIRST.to_string())],
        };

        if let Some(pagination) = query.pagination {
            params.push(("offset", pagination.offset().to_string()));
            params.push(("limit", pagination.limit().to_string()));
        }

        let (total, rows) = self.select_counted::<CommentRow>(TABLE, &params)?;
        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl CommentWriter for SupabaseRepository {
    fn create_comment(&self, new_comment: &NewComment) -> RepositoryResult<Comment> {
        let payload = CommentPayload {
            name: &new_comment.name,
            email: &new_comment.email,
            body: &new_comment.body,
            approved: false,
        };
        let row = self.insert_one::<_, CommentRow>(TABLE, &payload)?;
        Ok(row.into())
    }

    fn update_comment(&self, id: i32, updates: &UpdateComment) -> RepositoryResult<Comment> {
        let changes = CommentChanges {
            approved: updates.approved,
            pinned: updates.pinned,
        };
        self.update::<_, CommentRow>(TABLE, &id_filter(id), &changes)?
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepositoryError::NotFound)
    }

    fn delete_comment(&self, id: i32) -> RepositoryResult<()> {
        let removed = self.delete::<serde_json::Value>(TABLE, &id_filter(id))?;
        if removed.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
