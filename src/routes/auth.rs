use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use serde_json::json;

use crate::auth::Authenticator;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::LoginForm;
use crate::routes::{error_response, run_blocking, service_error_response};
use crate::services::auth as auth_service;

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_identity(req).ok_or_else(|| {
            InternalError::from_response(
                "unauthorized",
                error_response(StatusCode::UNAUTHORIZED, "unauthorized"),
            )
            .into()
        }))
    }
}

/// The identity id holds the serialized user written at login.
fn user_from_identity(req: &HttpRequest) -> Option<AuthenticatedUser> {
    let identity = req.get_identity().ok()?;
    let id = identity.id().ok()?;
    serde_json::from_str(&id).ok()
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    authenticator: web::Data<dyn Authenticator>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    let authenticator = authenticator.into_inner();
    let form = form.into_inner();

    let user = match run_blocking(move || auth_service::login(authenticator.as_ref(), form)).await
    {
        Ok(user) => user,
        Err(err) => return service_error_response(err, "log in", "unknown account"),
    };

    let id = match serde_json::to_string(&user) {
        Ok(id) => id,
        Err(err) => {
            log::error!("Failed to serialize identity: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
        }
    };

    if let Err(err) = Identity::login(&req.extensions(), id) {
        log::error!("Failed to attach identity: {err}");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");
    }

    log::info!("{} signed in via {:?}", user.email, user.provider);
    HttpResponse::Ok().json(user)
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    HttpResponse::Ok().json(json!({ "ok": true }))
}

#[get("/session")]
pub async fn session(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(user)
}
