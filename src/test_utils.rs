//! Shared test utilities for the library backend.
//!
//! This module provides common helper functions for setting up test stores
//! and creating test entities with sensible defaults.

use crate::{
    config::{
        database::{DEFAULT_DATABASE_URL, create_connection, create_tables},
        seed::{DEFAULT_SEED, parse_seed_config, seed_database},
    },
    core::{
        book::{self, NewBook},
        lease::NewLease,
        user::NewUser,
    },
    entities::{self, Role},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an empty in-memory store with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = create_connection(DEFAULT_DATABASE_URL).await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates an in-memory store populated with the embedded seed data.
///
/// Users 1..=3 are the admin, staff and student accounts; books 1 and 2 are
/// Clean Code and Harry Potter.
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_database(&db, &parse_seed_config(DEFAULT_SEED)?).await?;
    Ok(db)
}

/// Student registration with the given email.
///
/// # Defaults
/// * `name`: "Maria Silva"
/// * `password`: "password123"
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Maria Silva".to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        role: Role::Student,
    }
}

/// The Clean Code catalog entry: 464 pages, 5 in stock at 49.90.
pub fn clean_code() -> NewBook {
    NewBook {
        title: Some("Clean Code".to_string()),
        author: Some("Robert C. Martin".to_string()),
        pages: Some(464),
        description: Some("Um guia completo sobre boas práticas de programação".to_string()),
        image_url: None,
        stock: Some(5),
        price: Some(49.90),
    }
}

/// Creates a book with the given title and stock, 100 pages at 10.0.
pub async fn create_test_book(
    db: &DatabaseConnection,
    title: &str,
    stock: i32,
) -> Result<entities::book::Model> {
    book::create_book(
        db,
        NewBook {
            title: Some(title.to_string()),
            author: Some("Autor Teste".to_string()),
            pages: Some(100),
            stock: Some(stock),
            price: Some(10.0),
            ..Default::default()
        },
    )
    .await
}

/// Lease request for a fixed date range.
pub fn lease_request(book_id: i64, user_id: i64) -> NewLease {
    NewLease {
        book_id,
        user_id,
        start_date: Some("2025-01-01".to_string()),
        end_date: Some("2025-01-15".to_string()),
    }
}
