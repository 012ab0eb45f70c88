use actix_web::{HttpResponse, Responder, get, post, web};

use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::couriers::{AddCourierForm, CourierListParams};
use crate::repository::Store;
use crate::routes::{run_blocking, service_error_response};
use crate::services::couriers;

const NO_COURIERS: &str = "no couriers";

#[post("/couriers")]
pub async fn add_courier(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    config: web::Data<ServerConfig>,
    form: web::Json<AddCourierForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();
    let capacity = config.queue_capacity;

    match run_blocking(move || couriers::add_courier(repo.as_ref(), &user, form, capacity)).await {
        Ok(courier) => HttpResponse::Created().json(courier),
        Err(err) => service_error_response(err, "add courier", NO_COURIERS),
    }
}

#[get("/couriers")]
pub async fn list_couriers(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    params: web::Query<CourierListParams>,
) -> impl Responder {
    let repo = repo.into_inner();
    let params = params.into_inner();

    match run_blocking(move || couriers::list_couriers(repo.as_ref(), &user, params)).await {
        Ok(couriers) => HttpResponse::Ok().json(couriers),
        Err(err) => service_error_response(err, "list couriers", NO_COURIERS),
    }
}

#[post("/couriers/dequeue")]
pub async fn dequeue_courier(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || couriers::dequeue_courier(repo.as_ref(), &user)).await {
        Ok(courier) => HttpResponse::Ok().json(courier),
        Err(err) => service_error_response(err, "dequeue courier", NO_COURIERS),
    }
}
