use crate::domain::auth::AuthenticatedUser;
use crate::domain::comment::{Comment, CommentListQuery, UpdateComment};
use crate::forms::comments::{HideCommentForm, PinCommentForm, SubmitCommentForm};
use crate::pagination::{PageQuery, Paginated};
use crate::repository::{CommentReader, CommentWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Store a visitor comment; it stays hidden until approved.
pub fn submit_comment<R>(repo: &R, form: SubmitCommentForm) -> ServiceResult<Comment>
where
    R: CommentWriter + ?Sized,
{
    let new_comment = form
        .into_new_comment()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let comment = repo
        .create_comment(&new_comment)
        .map_err(ServiceError::from)?;
    log::info!("comment {} from {} pending approval", comment.id, comment.name);
    Ok(comment)
}

pub fn list_public_comments<R>(repo: &R) -> ServiceResult<Vec<Comment>>
where
    R: CommentReader + ?Sized,
{
    let (_total, comments) = repo
        .list_comments(CommentListQuery::public())
        .map_err(ServiceError::from)?;
    Ok(comments)
}

/// Moderation view: every comment, oldest first.
pub fn list_all_comments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PageQuery,
) -> ServiceResult<Paginated<Comment>>
where
    R: CommentReader + ?Sized,
{
    ensure_admin(user)?;

    let pagination = query.pagination();
    let (total, comments) = repo
        .list_comments(CommentListQuery::all().paginate(pagination))
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(comments, pagination, total))
}

pub fn approve_comment<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Comment>
where
    R: CommentWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.update_comment(id, &UpdateComment::new().approved(true))
        .map_err(ServiceError::from)
}

/// Withdraw a comment from the public list without deleting it.
pub fn hide_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: HideCommentForm,
) -> ServiceResult<Comment>
where
    R: CommentWriter + ?Sized,
{
    ensure_admin(user)?;

    let id = form
        .comment_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_comment(id, &UpdateComment::new().approved(false))
        .map_err(ServiceError::from)
}

pub fn pin_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: PinCommentForm,
) -> ServiceResult<Comment>
where
    R: CommentWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.update_comment(id, &UpdateComment::new().pinned(form.pinned))
        .map_err(ServiceError::from)
}

pub fn remove_comment<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: CommentWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_comment(id).map_err(ServiceError::from)
}
