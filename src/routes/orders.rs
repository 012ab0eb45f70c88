use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::orders::{PlaceOrderForm, QuickOrderForm};
use crate::pagination::PageQuery;
use crate::repository::Store;
use crate::routes::{run_blocking, service_error_response};
use crate::services::orders;

const NO_ORDERS: &str = "no orders";

#[post("/orders")]
pub async fn place_order(
    repo: web::Data<dyn Store>,
    form: web::Json<PlaceOrderForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();

    match run_blocking(move || orders::place_order(repo.as_ref(), form)).await {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => service_error_response(err, "place order", NO_ORDERS),
    }
}

#[get("/orders")]
pub async fn list_order_history(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    params: web::Query<PageQuery>,
) -> impl Responder {
    let repo = repo.into_inner();
    let params = params.into_inner();

    match run_blocking(move || orders::list_order_history(repo.as_ref(), &user, params)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list order history", NO_ORDERS),
    }
}

#[post("/orders/admin")]
pub async fn quick_order(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    config: web::Data<ServerConfig>,
    form: web::Json<QuickOrderForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();
    let capacity = config.queue_capacity;

    match run_blocking(move || orders::quick_order(repo.as_ref(), &user, form, capacity)).await {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => service_error_response(err, "enqueue admin order", NO_ORDERS),
    }
}

#[get("/orders/queue")]
pub async fn list_queue(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || orders::list_queue(repo.as_ref(), &user)).await {
        Ok(queue) => HttpResponse::Ok().json(queue),
        Err(err) => service_error_response(err, "list order queue", NO_ORDERS),
    }
}

#[post("/orders/dequeue")]
pub async fn dequeue_order(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || orders::dequeue_order(repo.as_ref(), &user)).await {
        Ok(dequeued) => HttpResponse::Ok().json(dequeued),
        Err(err) => service_error_response(err, "dequeue order", NO_ORDERS),
    }
}

#[get("/orders/export")]
pub async fn export_queue(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || orders::export_queue(repo.as_ref(), &user)).await {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ))
            .body(csv),
        Err(err) => service_error_response(err, "export order queue", NO_ORDERS),
    }
}
