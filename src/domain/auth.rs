use serde::{Deserialize, Serialize};

/// Where a user's credentials were verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Local,
    Supabase,
}

/// Back-office user restored from the identity cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
    pub roles: Vec<String>,
    pub provider: AuthProvider,
}

impl AuthenticatedUser {
    pub fn new(email: impl Into<String>, provider: AuthProvider) -> Self {
        Self {
            email: email.into().to_lowercase(),
            roles: Vec::new(),
            provider,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }
}
