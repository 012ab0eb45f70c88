use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::comment::{
        Comment as DomainComment, CommentListQuery, CommentVisibility,
        NewComment as DomainNewComment, UpdateComment as DomainUpdateComment,
    },
    models::comment::{
        Comment as DbComment, NewComment as DbNewComment, UpdateComment as DbUpdateComment,
    },
    repository::{
        CommentReader, CommentWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CommentReader for DieselRepository {
    fn list_comments(
        &self,
        query: CommentListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainComment>)> {
        use crate::schema::comments;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = comments::table.into_boxed::<Sqlite>();
            if query.visibility == CommentVisibility::Public {
                items = items.filter(comments::approved.eq(true));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = match query.visibility {
            CommentVisibility::Public => query_builder().order((
                comments::pinned.desc(),
                comments::created_at.desc(),
                comments::id.desc(),
            )),
            CommentVisibility::All => {
                query_builder().order((comments::created_at.asc(), comments::id.asc()))
            }
        };

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items.load::<DbComment>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, new_comment: &DomainNewComment) -> RepositoryResult<DomainComment> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(comments::table)
            .values(DbNewComment::from(new_comment))
            .get_result::<DbComment>(&mut conn)?;

        Ok(created.into())
    }

    fn update_comment(
        &self,
        id: i32,
        updates: &DomainUpdateComment,
    ) -> RepositoryResult<DomainComment> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let updated = diesel::update(comments::table.find(id))
            .set(DbUpdateComment::from(updates))
            .get_result::<DbComment>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_comment(&self, id: i32) -> RepositoryResult<()> {
        use crate::schema::comments;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(comments::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
