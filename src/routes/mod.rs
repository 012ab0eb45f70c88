use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::{ServiceError, ServiceResult};

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod comments;
pub mod couriers;
pub mod deliveries;
pub mod health;
pub mod orders;
pub mod promotions;

/// JSON body of every failed API response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Register every `/api` endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(health::health)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::session)
            .service(catalog::list_products)
            .service(cart::show_cart)
            .service(cart::add_to_cart)
            .service(cart::undo_cart)
            .service(cart::clear_cart)
            .service(orders::list_queue)
            .service(orders::export_queue)
            .service(orders::dequeue_order)
            .service(orders::quick_order)
            .service(orders::list_order_history)
            .service(orders::place_order)
            .service(deliveries::dequeue_delivery)
            .service(deliveries::complete_delivery)
            .service(deliveries::list_deliveries)
            .service(deliveries::schedule_delivery)
            .service(couriers::dequeue_courier)
            .service(couriers::list_couriers)
            .service(couriers::add_courier)
            .service(comments::list_all_comments)
            .service(comments::hide_comment)
            .service(comments::approve_comment)
            .service(comments::pin_comment)
            .service(comments::remove_comment)
            .service(comments::list_public_comments)
            .service(comments::submit_comment)
            .service(promotions::pop_promotion)
            .service(promotions::import_promotions)
            .service(promotions::remove_promotion)
            .service(promotions::list_promotions)
            .service(promotions::add_promotion),
    );
}

/// Malformed JSON bodies are answered in the same `{ error }` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(
            err,
            error_response(StatusCode::BAD_REQUEST, message),
        )
        .into()
    })
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: message.into(),
    })
}

/// Render a service failure, using `not_found` as the 404 message.
pub(crate) fn service_error_response(
    err: ServiceError,
    operation: &str,
    not_found: &str,
) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => error_response(StatusCode::UNAUTHORIZED, "unauthorized"),
        ServiceError::NotFound => error_response(StatusCode::NOT_FOUND, not_found),
        ServiceError::Form(message) => error_response(StatusCode::BAD_REQUEST, message),
        ServiceError::Conflict(message) => error_response(StatusCode::CONFLICT, message),
        ServiceError::Internal(message) => {
            log::error!("Failed to {operation}: {message}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

/// Run a synchronous service call on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(call: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match web::block(call).await {
        Ok(result) => result,
        Err(err) => Err(ServiceError::Internal(err.to_string())),
    }
}
