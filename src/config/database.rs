//! Store configuration module.
//!
//! The entity store is a SQLite database reached through `SeaORM`. By default it is
//! in-memory, so it lives exactly as long as the process. Tables are generated from
//! the entity definitions with `Schema::create_table_from_entity`, keeping the schema
//! in lockstep with the Rust structs.

use crate::entities::{Book, Credential, Favorite, Lease, Purchase, User};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;

/// Connection URL used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

// An in-memory database disappears with its connection, so the pool must never
// recycle it.
const CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Gets the database URL from the environment or returns the in-memory default.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens the store.
///
/// The pool is pinned to one long-lived connection: every statement is serialized
/// and a transaction holds the whole store until it commits.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(CONNECTION_LIFETIME)
        .max_lifetime(CONNECTION_LIFETIME)
        .sqlx_logging(false);

    tracing::debug!("Connecting to store at {}", database_url);
    Database::connect(options).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let tables = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Credential),
        schema.create_table_from_entity(Book),
        schema.create_table_from_entity(Favorite),
        schema.create_table_from_entity(Lease),
        schema.create_table_from_entity(Purchase),
    ];

    for table in &tables {
        db.execute(builder.build(table)).await?;
    }

    Ok(())
}
