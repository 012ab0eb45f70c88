use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use beupro_shop::auth::{Authenticator, LocalAuthenticator, SupabaseAuthenticator};
use beupro_shop::config::{AuthKind, BackendKind, ServerConfig, SupabaseConfig};
use beupro_shop::db::{establish_connection_pool, run_migrations};
use beupro_shop::repository::{DieselRepository, FallbackRepository, Store, SupabaseRepository};
use beupro_shop::routes;

/// Removes the pid file when the server stops.
struct PidFile(PathBuf);

impl PidFile {
    fn create(path: &Path) -> std::io::Result<Self> {
        std::fs::write(path, std::process::id().to_string())?;
        Ok(Self(path.to_path_buf()))
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.0) {
            log::warn!("Failed to remove pid file {}: {err}", self.0.display());
        }
    }
}

fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        Some(_) => {
            log::warn!("SECRET_KEY is shorter than 64 bytes; generating a session key");
            Key::generate()
        }
        None => {
            log::warn!("SECRET_KEY not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}

async fn supabase_store(config: &SupabaseConfig) -> Result<Arc<dyn Store>, String> {
    let config = config.clone();
    // reqwest's blocking client may not be built on an async worker thread.
    let repo = web::block(move || SupabaseRepository::new(&config.url, &config.anon_key))
        .await
        .map_err(|err| err.to_string())?
        .map_err(|err| err.to_string())?;
    Ok(Arc::new(repo))
}

async fn build_authenticator(config: &ServerConfig) -> Result<Arc<dyn Authenticator>, String> {
    match (config.auth, &config.supabase, &config.admin) {
        (AuthKind::Supabase, Some(supabase), _) => {
            let supabase = supabase.clone();
            let authenticator = web::block(move || {
                SupabaseAuthenticator::new(&supabase.url, &supabase.anon_key)
            })
            .await
            .map_err(|err| err.to_string())?
            .map_err(|err| err.to_string())?;
            Ok(Arc::new(authenticator))
        }
        (AuthKind::Local, _, Some(admin)) => Ok(Arc::new(LocalAuthenticator::new(admin.clone()))),
        _ => Err("authentication is not configured".to_string()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_migrations(&pool) {
        log::error!("{e}");
        std::process::exit(1);
    }
    let local: Arc<dyn Store> = Arc::new(DieselRepository::new(pool));

    let store: Arc<dyn Store> = match (config.backend, &config.supabase) {
        (BackendKind::Sqlite, _) => local,
        (BackendKind::Supabase, Some(supabase)) => match supabase_store(supabase).await {
            Ok(store) => store,
            Err(e) => {
                log::error!("Failed to create Supabase client: {e}");
                std::process::exit(1);
            }
        },
        (BackendKind::Fallback, Some(supabase)) => match supabase_store(supabase).await {
            Ok(remote) => Arc::new(FallbackRepository::new(local, remote)),
            Err(e) => {
                log::error!("Failed to create Supabase client: {e}");
                std::process::exit(1);
            }
        },
        (_, None) => {
            log::error!("SUPABASE_URL and SUPABASE_ANON_KEY must be set for {:?}", config.backend);
            std::process::exit(1);
        }
    };

    let authenticator = match build_authenticator(&config).await {
        Ok(authenticator) => authenticator,
        Err(e) => {
            log::error!("Failed to configure authentication: {e}");
            std::process::exit(1);
        }
    };

    let _pid_file = match config.pid_file.as_deref().map(PidFile::create).transpose() {
        Ok(pid_file) => pid_file,
        Err(e) => {
            log::error!("Failed to write pid file: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = cookie_key(config.secret.as_deref());
    let store = web::Data::from(store);
    let authenticator = web::Data::from(authenticator);
    let address = config.address.clone();
    let port = config.port;
    let domain = config.domain.clone();
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::warn!("Static directory {} not found; serving API only", static_dir.display());
    }
    let server_config = web::Data::new(config);

    log::info!(
        "Starting server on {address}:{port} with {} backend",
        store.backend_name()
    );

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(domain.clone())
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(authenticator.clone())
            .app_data(server_config.clone())
            .configure(routes::configure);

        if serve_static {
            app = app.service(Files::new("/", &static_dir).index_file("index.html"));
        }

        app
    })
    .bind((address, port))?
    .run()
    .await
}
