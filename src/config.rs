use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Storage backend selected by `BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Supabase,
    /// SQLite first, Supabase when SQLite is unavailable.
    Fallback,
}

impl FromStr for BackendKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "local" => Ok(Self::Sqlite),
            "supabase" => Ok(Self::Supabase),
            "fallback" => Ok(Self::Fallback),
            _ => Err(()),
        }
    }
}

/// Credential check used by `/api/login`, selected by `AUTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Local,
    Supabase,
}

impl FromStr for AuthKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "supabase" => Ok(Self::Supabase),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Everything the server reads from its environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub domain: Option<String>,
    /// Raw cookie signing secret; `None` means a key is generated per run.
    pub secret: Option<String>,
    pub backend: BackendKind,
    pub supabase: Option<SupabaseConfig>,
    pub auth: AuthKind,
    pub admin: Option<AdminCredentials>,
    pub static_dir: PathBuf,
    pub queue_capacity: usize,
    pub pid_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match var("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        let backend = match var("BACKEND") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "BACKEND",
                value,
            })?,
            None => BackendKind::Sqlite,
        };

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig { url, anon_key }),
            _ => None,
        };

        if backend != BackendKind::Sqlite && supabase.is_none() {
            return Err(ConfigError::Missing("SUPABASE_URL and SUPABASE_ANON_KEY"));
        }

        let auth = match var("AUTH") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "AUTH",
                value,
            })?,
            None if supabase.is_some() => AuthKind::Supabase,
            None => AuthKind::Local,
        };

        if auth == AuthKind::Supabase && supabase.is_none() {
            return Err(ConfigError::Missing("SUPABASE_URL and SUPABASE_ANON_KEY"));
        }

        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminCredentials { email, password }),
            _ => None,
        };

        if auth == AuthKind::Local && admin.is_none() {
            return Err(ConfigError::Missing("ADMIN_EMAIL and ADMIN_PASSWORD"));
        }

        let queue_capacity = match var("QUEUE_CAPACITY") {
            Some(value) => match value.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "QUEUE_CAPACITY",
                        value,
                    });
                }
            },
            None => DEFAULT_QUEUE_CAPACITY,
        };

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "beupro.sqlite".to_string()),
            address: var("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            domain: var("DOMAIN"),
            secret: var("SECRET_KEY"),
            backend,
            supabase,
            auth,
            admin,
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            queue_capacity,
            pid_file: var("PID_FILE").map(PathBuf::from),
        })
    }
}
