//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use jsonwebtoken::{EncodingKey, Header};
use tempfile::TempDir;

use arts_shop::db::{DbPool, establish_connection_pool};
use arts_shop::domain::auth::AdminClaims;
use arts_shop::domain::product::{NewProduct, Product};
use arts_shop::repository::{DieselRepository, ProductWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

pub const JWT_SECRET: &str = "integration-test-secret-with-enough-bytes";

/// Temporary database used in integration tests. The backing directory is
/// removed, WAL files included, when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Insert a product directly through the repository.
pub fn insert_product(repo: &DieselRepository, product: NewProduct) -> Product {
    repo.create_product(&product).expect("insert product")
}

/// Small catalog shared by the listing tests.
///
/// | id | title             | price | category   | type   | available | best seller |
/// |----|-------------------|-------|------------|--------|-----------|-------------|
/// | 1  | Ocean Resin Tray  | 1500  | resin      | tray   | yes       | yes         |
/// | 2  | Sunset Canvas     | 4200  | painting   | canvas | yes       | no          |
/// | 3  | Mini Resin Coaster| 300   | Resin      | -      | no        | no          |
/// | 4  | Macrame Wall Art  | 2200  | home decor | wall   | yes       | yes         |
/// | 5  | Clay Keychain     | 150   | crafts     | -      | yes       | no          |
pub fn seed_catalog(repo: &DieselRepository) -> Vec<Product> {
    vec![
        insert_product(
            repo,
            NewProduct::new(1, "Ocean Resin Tray", 1500.0, "resin")
                .with_type("tray")
                .best_seller(),
        ),
        insert_product(
            repo,
            NewProduct::new(2, "Sunset Canvas", 4200.0, "painting")
                .with_type("canvas")
                .on_sale(10),
        ),
        insert_product(
            repo,
            NewProduct::new(3, "Mini Resin Coaster", 300.0, "Resin").with_availability(false),
        ),
        insert_product(
            repo,
            NewProduct::new(4, "Macrame Wall Art", 2200.0, "home decor")
                .with_type("Wall")
                .best_seller()
                .latest(),
        ),
        insert_product(
            repo,
            NewProduct::new(5, "Clay Keychain", 150.0, "crafts"),
        ),
    ]
}

/// Signed bearer token for the given role.
pub fn bearer_token(role: &str) -> String {
    bearer_token_with(role, JWT_SECRET, 3600)
}

pub fn bearer_token_with(role: &str, secret: &str, expires_in: i64) -> String {
    let claims = AdminClaims {
        sub: Some("owner@example.com".to_string()),
        role: role.to_string(),
        exp: (chrono::Utc::now().timestamp() + expires_in) as u64,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode token");
    format!("Bearer {token}")
}
