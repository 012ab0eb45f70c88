//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use beupro_shop::SERVICE_ACCESS_ROLE;
use beupro_shop::db::{DbPool, establish_connection_pool, run_migrations};
use beupro_shop::domain::auth::{AuthProvider, AuthenticatedUser};
use beupro_shop::domain::cart::{Cart, CartLine};
use beupro_shop::domain::order::ContactDetails;
use tempfile::TempDir;

/// Temporary database used in integration tests.
///
/// The file lives in its own temporary directory, removed on drop together
/// with the WAL side files.
pub struct TestDb {
    pool: DbPool,
    path: PathBuf,
    dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir.");
        let path = dir.path().join(filename);

        let pool = establish_connection_pool(path.to_str().expect("utf-8 temp path"))
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { pool, path, dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser::new("admin@beupro.ph", AuthProvider::Local).with_role(SERVICE_ACCESS_ROLE)
}

pub fn contact(fullname: &str) -> ContactDetails {
    ContactDetails {
        fullname: fullname.to_string(),
        phone: "09171234567".to_string(),
        email: format!("{}@example.ph", fullname.to_lowercase().replace(' ', ".")),
        address: "12 Rizal St".to_string(),
        city: "Makati".to_string(),
        postal: "1200".to_string(),
    }
}

pub fn line(id: &str, price_cents: i64, qty: i32) -> CartLine {
    CartLine {
        id: id.to_string(),
        name: id.to_string(),
        price_cents,
        qty,
    }
}

pub fn set_cart() -> Cart {
    let mut cart = Cart::default();
    cart.push(line("set-c-1", 88_500, 1));
    cart.push(line("extra-1", 14_800, 2));
    cart
}
