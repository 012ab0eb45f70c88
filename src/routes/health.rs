use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::repository::Store;

#[get("/health")]
pub async fn health(repo: web::Data<dyn Store>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "backend": repo.backend_name(),
    }))
}
