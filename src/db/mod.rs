//! Database module for VirtualTourist
//!
//! Provides SQLite database access via Diesel ORM.

pub mod models;
pub mod repository;
pub mod schema;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Path of the SQLite store inside the data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("virtual_tourist.db")
}

/// Enables foreign key enforcement on every pooled connection. SQLite
/// leaves it off by default, which would break the pin -> photo cascade.
#[derive(Debug)]
struct ForeignKeysEnabled;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ForeignKeysEnabled {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        use diesel::connection::SimpleConnection;
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Establish a connection pool to the SQLite database
pub fn establish_connection(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(5)
        .connection_customizer(Box::new(ForeignKeysEnabled))
        .build(manager)
}

/// Run pending database migrations
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;
    Ok(())
}

/// Initialize the database with a connection pool
pub fn init_database(database_path: &Path) -> Result<DbPool> {
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database_url = format!("sqlite://{}?mode=rwc", database_path.display());
    let pool = establish_connection(&database_url)?;

    // Run migrations
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}
