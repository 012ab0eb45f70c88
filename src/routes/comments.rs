use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::comments::{HideCommentForm, PinCommentForm, SubmitCommentForm};
use crate::pagination::PageQuery;
use crate::repository::Store;
use crate::routes::{run_blocking, service_error_response};
use crate::services::comments;

const COMMENT_NOT_FOUND: &str = "comment not found";

#[post("/comments")]
pub async fn submit_comment(
    repo: web::Data<dyn Store>,
    form: web::Json<SubmitCommentForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();

    match run_blocking(move || comments::submit_comment(repo.as_ref(), form)).await {
        Ok(comment) => HttpResponse::Created().json(json!({
            "ok": true,
            "status": "pending approval",
            "comment": comment,
        })),
        Err(err) => service_error_response(err, "submit comment", COMMENT_NOT_FOUND),
    }
}

#[get("/comments")]
pub async fn list_public_comments(repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || comments::list_public_comments(repo.as_ref())).await {
        Ok(comments) => HttpResponse::Ok().json(comments),
        Err(err) => service_error_response(err, "list comments", COMMENT_NOT_FOUND),
    }
}

#[get("/comments/all")]
pub async fn list_all_comments(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    params: web::Query<PageQuery>,
) -> impl Responder {
    let repo = repo.into_inner();
    let params = params.into_inner();

    match run_blocking(move || comments::list_all_comments(repo.as_ref(), &user, params)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list all comments", COMMENT_NOT_FOUND),
    }
}

#[post("/comments/{id}/approve")]
pub async fn approve_comment(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> impl Responder {
    let repo = repo.into_inner();
    let id = path.into_inner();

    match run_blocking(move || comments::approve_comment(repo.as_ref(), &user, id)).await {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(err) => service_error_response(err, "approve comment", COMMENT_NOT_FOUND),
    }
}

#[post("/comments/hide")]
pub async fn hide_comment(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    form: web::Json<HideCommentForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();

    match run_blocking(move || comments::hide_comment(repo.as_ref(), &user, form)).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "ok": true })),
        Err(err) => service_error_response(err, "hide comment", COMMENT_NOT_FOUND),
    }
}

#[post("/comments/{id}/pin")]
pub async fn pin_comment(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    path: web::Path<i32>,
    form: Option<web::Json<PinCommentForm>>,
) -> impl Responder {
    let repo = repo.into_inner();
    let id = path.into_inner();
    let form = form.map(web::Json::into_inner).unwrap_or_default();

    match run_blocking(move || comments::pin_comment(repo.as_ref(), &user, id, form)).await {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(err) => service_error_response(err, "pin comment", COMMENT_NOT_FOUND),
    }
}

#[post("/comments/{id}/delete")]
pub async fn remove_comment(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> impl Responder {
    let repo = repo.into_inner();
    let id = path.into_inner();

    match run_blocking(move || comments::remove_comment(repo.as_ref(), &user, id)).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "ok": true })),
        Err(err) => service_error_response(err, "remove comment", COMMENT_NOT_FOUND),
    }
}
