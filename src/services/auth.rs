use crate::auth::{AuthError, Authenticator};
use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::LoginForm;
use crate::services::{ServiceError, ServiceResult};

/// Check the submitted credentials against the configured authenticator.
pub fn login<A>(authenticator: &A, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    A: Authenticator + ?Sized,
{
    let credentials = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    authenticator
        .authenticate(&credentials.email, &credentials.password)
        .map_err(|err| match err {
            AuthError::InvalidCredentials => ServiceError::Unauthorized,
            AuthError::Unavailable(message) => ServiceError::Internal(message),
        })
}
