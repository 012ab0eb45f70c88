use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::deliveries::{CompleteDeliveryForm, ScheduleDeliveryForm};
use crate::repository::Store;
use crate::routes::{run_blocking, service_error_response};
use crate::services::deliveries;

#[post("/deliveries")]
pub async fn schedule_delivery(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    config: web::Data<ServerConfig>,
    form: web::Json<ScheduleDeliveryForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();
    let capacity = config.queue_capacity;

    match run_blocking(move || deliveries::schedule_delivery(repo.as_ref(), &user, form, capacity))
        .await
    {
        Ok(delivery) => HttpResponse::Created().json(delivery),
        Err(err) => service_error_response(err, "schedule delivery", "courier not found"),
    }
}

#[get("/deliveries")]
pub async fn list_deliveries(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || deliveries::list_deliveries(repo.as_ref(), &user)).await {
        Ok(deliveries) => HttpResponse::Ok().json(deliveries),
        Err(err) => service_error_response(err, "list deliveries", "no deliveries"),
    }
}

#[post("/deliveries/dequeue")]
pub async fn dequeue_delivery(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || deliveries::dequeue_delivery(repo.as_ref(), &user)).await {
        Ok(released) => HttpResponse::Ok().json(released),
        Err(err) => service_error_response(err, "dequeue delivery", "no deliveries"),
    }
}

#[post("/deliveries/complete")]
pub async fn complete_delivery(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    form: web::Json<CompleteDeliveryForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();

    match run_blocking(move || deliveries::complete_delivery(repo.as_ref(), &user, form)).await {
        Ok(released) => HttpResponse::Ok().json(json!({
            "ok": true,
            "courier_restored": released.courier_restored,
        })),
        Err(err) => service_error_response(err, "complete delivery", "delivery not found"),
    }
}
