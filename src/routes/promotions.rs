use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::promotions::{AddPromotionForm, UploadPromotionsForm};
use crate::repository::Store;
use crate::routes::{run_blocking, service_error_response};
use crate::services::promotions;

const NO_PROMOTIONS: &str = "no promotions";

#[get("/promotions")]
pub async fn list_promotions(repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || promotions::list_promotions(repo.as_ref())).await {
        Ok(promotions) => HttpResponse::Ok().json(promotions),
        Err(err) => service_error_response(err, "list promotions", NO_PROMOTIONS),
    }
}

#[post("/promotions")]
pub async fn add_promotion(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    config: web::Data<ServerConfig>,
    form: web::Json<AddPromotionForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let form = form.into_inner();
    let capacity = config.queue_capacity;

    match run_blocking(move || promotions::add_promotion(repo.as_ref(), &user, form, capacity))
        .await
    {
        Ok(promotion) => HttpResponse::Created().json(promotion),
        Err(err) => service_error_response(err, "add promotion", NO_PROMOTIONS),
    }
}

#[post("/promotions/pop")]
pub async fn pop_promotion(user: AuthenticatedUser, repo: web::Data<dyn Store>) -> impl Responder {
    let repo = repo.into_inner();

    match run_blocking(move || promotions::pop_promotion(repo.as_ref(), &user)).await {
        Ok(promotion) => HttpResponse::Ok().json(promotion),
        Err(err) => service_error_response(err, "pop promotion", NO_PROMOTIONS),
    }
}

#[post("/promotions/{id}/delete")]
pub async fn remove_promotion(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    path: web::Path<i32>,
) -> impl Responder {
    let repo = repo.into_inner();
    let id = path.into_inner();

    match run_blocking(move || promotions::remove_promotion(repo.as_ref(), &user, id)).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "ok": true })),
        Err(err) => service_error_response(err, "remove promotion", "promotion not found"),
    }
}

#[post("/promotions/upload")]
pub async fn import_promotions(
    user: AuthenticatedUser,
    repo: web::Data<dyn Store>,
    config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadPromotionsForm>,
) -> impl Responder {
    let repo = repo.into_inner();
    let capacity = config.queue_capacity;

    match run_blocking(move || {
        promotions::import_promotions(repo.as_ref(), &user, form, capacity)
    })
    .await
    {
        Ok(imported) => HttpResponse::Ok().json(json!({ "imported": imported })),
        Err(err) => service_error_response(err, "import promotions", NO_PROMOTIONS),
    }
}
