//! Credential checks for the back-office login.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::SERVICE_ACCESS_ROLE;
use crate::config::AdminCredentials;
use crate::domain::auth::{AuthProvider, AuthenticatedUser};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication provider unavailable: {0}")]
    Unavailable(String),
}

/// Verifies an email/password pair and describes the signed-in user.
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Single administrator account configured through the environment.
pub struct LocalAuthenticator {
    credentials: AdminCredentials,
}

impl LocalAuthenticator {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }
}

impl Authenticator for LocalAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let email_matches = self.credentials.email.eq_ignore_ascii_case(email.trim());
        if !email_matches || self.credentials.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthenticatedUser::new(email.trim(), AuthProvider::Local).with_role(SERVICE_ACCESS_ROLE))
    }
}

/// Password grant against Supabase Auth (GoTrue).
///
/// Any account the project accepts is treated as an administrator.
pub struct SupabaseAuthenticator {
    token_url: String,
    anon_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    email: String,
}

impl SupabaseAuthenticator {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        Ok(Self {
            token_url: format!(
                "{}/auth/v1/token?grant_type=password",
                base_url.trim_end_matches('/')
            ),
            anon_key: anon_key.to_string(),
            client,
        })
    }
}

impl Authenticator for SupabaseAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email.trim(), "password": password }))
            .send()
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            log::info!("supabase rejected login for {email}: {status}");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!("auth endpoint returned {status}")));
        }

        let token = response
            .json::<TokenResponse>()
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        Ok(AuthenticatedUser::new(token.user.email, AuthProvider::Supabase)
            .with_role(SERVICE_ACCESS_ROLE))
    }
}
