use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;
use uuid::Uuid;

use crate::forms::cart::{AddCartItemForm, CartSessionParams, UndoCartForm, normalize_session_id};
use crate::repository::Store;
use crate::routes::{error_response, run_blocking, service_error_response};
use crate::services::cart;

const CART_SESSION_KEY: &str = "cart_session";
const CART_EMPTY: &str = "cart is empty";

/// Resolve the cart session: an explicit id wins, otherwise the cookie
/// session carries a generated `sess_` id.
fn cart_session_id(explicit: Option<&str>, session: &Session) -> Result<String, HttpResponse> {
    if let Some(session_id) = normalize_session_id(explicit) {
        return Ok(session_id);
    }

    match session.get::<String>(CART_SESSION_KEY) {
        Ok(Some(session_id)) => return Ok(session_id),
        Ok(None) => {}
        Err(err) => log::warn!("Discarding unreadable cart session: {err}"),
    }

    let session_id = format!("sess_{}", &Uuid::new_v4().simple().to_string()[..10]);
    session
        .insert(CART_SESSION_KEY, &session_id)
        .map_err(|err| {
            log::error!("Failed to store cart session: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        })?;
    Ok(session_id)
}

#[get("/cart")]
pub async fn show_cart(
    params: web::Query<CartSessionParams>,
    session: Session,
    repo: web::Data<dyn Store>,
) -> impl Responder {
    let session_id = match cart_session_id(params.session_id.as_deref(), &session) {
        Ok(session_id) => session_id,
        Err(response) => return response,
    };
    let repo = repo.into_inner();

    match run_blocking(move || cart::load_cart(repo.as_ref(), &session_id)).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => service_error_response(err, "load cart", CART_EMPTY),
    }
}

#[post("/cart")]
pub async fn add_to_cart(
    session: Session,
    repo: web::Data<dyn Store>,
    form: web::Json<AddCartItemForm>,
) -> impl Responder {
    let form = form.into_inner();
    let session_id = match cart_session_id(form.session_id.as_deref(), &session) {
        Ok(session_id) => session_id,
        Err(response) => return response,
    };
    let repo = repo.into_inner();

    match run_blocking(move || cart::add_item(repo.as_ref(), &session_id, form)).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => service_error_response(err, "add cart item", CART_EMPTY),
    }
}

#[post("/cart/undo")]
pub async fn undo_cart(
    session: Session,
    repo: web::Data<dyn Store>,
    form: Option<web::Json<UndoCartForm>>,
) -> impl Responder {
    let form = form.map(web::Json::into_inner).unwrap_or_default();
    let session_id = match cart_session_id(form.session_id.as_deref(), &session) {
        Ok(session_id) => session_id,
        Err(response) => return response,
    };
    let repo = repo.into_inner();

    match run_blocking(move || cart::undo_item(repo.as_ref(), &session_id, form)).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(err, "undo cart item", CART_EMPTY),
    }
}

#[post("/cart/clear")]
pub async fn clear_cart(
    session: Session,
    repo: web::Data<dyn Store>,
    params: Option<web::Json<CartSessionParams>>,
) -> impl Responder {
    let params = params.map(web::Json::into_inner).unwrap_or_default();
    let session_id = match cart_session_id(params.session_id.as_deref(), &session) {
        Ok(session_id) => session_id,
        Err(response) => return response,
    };
    let repo = repo.into_inner();

    match run_blocking(move || cart::clear_cart(repo.as_ref(), &session_id)).await {
        Ok(removed) => HttpResponse::Ok().json(json!({ "removed": removed })),
        Err(err) => service_error_response(err, "clear cart", CART_EMPTY),
    }
}
