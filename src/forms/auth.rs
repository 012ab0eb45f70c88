use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::empty_string_as_none;

#[derive(Debug, Error)]
pub enum LoginFormError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 254))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 256))]
    pub password: Option<String>,
}

/// Email and password ready to hand to an authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn into_credentials(self) -> Result<Credentials, LoginFormError> {
        self.validate()?;
        match (self.email, self.password) {
            (Some(email), Some(password)) => Ok(Credentials {
                email: email.trim().to_string(),
                password,
            }),
            _ => Err(LoginFormError::MissingCredentials),
        }
    }
}
