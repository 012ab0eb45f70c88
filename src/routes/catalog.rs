use actix_web::{HttpResponse, Responder, get};

use crate::services::catalog;

#[get("/products")]
pub async fn list_products() -> impl Responder {
    HttpResponse::Ok().json(catalog::load_products())
}
