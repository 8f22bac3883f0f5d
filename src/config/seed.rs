//! Seed data loading from TOML.
//!
//! The store starts from a seed file: either the one named by `BIBLIOTECA_SEED` or
//! the `seed.toml` embedded at build time. Seeding goes through the regular domain
//! operations, so seed records get the same validation and sequential ids as
//! anything created later.

use crate::{
    core::{
        book::{self, NewBook},
        user::{self, NewUser},
    },
    entities::{Role, user::PRIMARY_ADMIN_ID},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;

/// Seed file bundled with the binary.
pub const DEFAULT_SEED: &str = include_str!("../../seed.toml");

/// Structure of a seed file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Accounts, in id order; the first must be an admin
    #[serde(default)]
    pub users: Vec<SeedUser>,
    /// Catalog entries, in id order
    #[serde(default)]
    pub books: Vec<SeedBook>,
}

/// One seed account
#[derive(Debug, Deserialize, Clone)]
pub struct SeedUser {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Role code (1-3), defaults to student
    #[serde(default = "default_role")]
    pub role: i32,
}

/// One seed book
#[derive(Debug, Deserialize, Clone)]
pub struct SeedBook {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Page count
    pub pages: i32,
    /// Synopsis
    #[serde(default)]
    pub description: String,
    /// Cover image URL
    #[serde(default)]
    pub image_url: String,
    /// Copies on hand
    #[serde(default)]
    pub stock: i32,
    /// Unit price
    #[serde(default)]
    pub price: f64,
}

const fn default_role() -> i32 {
    1
}

/// Parses seed data from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is invalid or fields are missing.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed data: {e}"),
    })
}

/// Loads seed data from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or parsed.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading seed data from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path_ref.display()),
    })?;
    parse_seed_config(&contents)
}

/// Loads the seed file if one is given, otherwise the embedded default.
pub fn load_seed_or_default(path: Option<&Path>) -> Result<SeedConfig> {
    path.map_or_else(|| parse_seed_config(DEFAULT_SEED), load_seed_config)
}

/// Populates an empty store with the seed records.
///
/// # Errors
/// Returns [`Error::Config`] when there are no users, or when the first user is
/// not an admin or does not land on id 1 (for example because the store was not
/// empty). Propagates any validation error raised by the domain operations.
pub async fn seed_database(db: &DatabaseConnection, seed: &SeedConfig) -> Result<()> {
    if seed.users.is_empty() {
        return Err(Error::Config {
            message: "Seed data must start with the primary admin user".to_string(),
        });
    }

    for (index, entry) in seed.users.iter().enumerate() {
        let role = Role::try_from(entry.role).map_err(|e| Error::Config {
            message: format!("Seed user {}: {e}", entry.email),
        })?;
        if index == 0 && role != Role::Admin {
            return Err(Error::Config {
                message: "The first seed user must be an admin".to_string(),
            });
        }

        let created = user::register(
            db,
            NewUser {
                name: entry.name.clone(),
                email: entry.email.clone(),
                password: entry.password.clone(),
                role,
            },
        )
        .await?;

        if index == 0 && created.id != PRIMARY_ADMIN_ID {
            return Err(Error::Config {
                message: format!(
                    "Primary admin was assigned id {} instead of {PRIMARY_ADMIN_ID}",
                    created.id
                ),
            });
        }
    }

    for entry in &seed.books {
        book::create_book(
            db,
            NewBook {
                title: Some(entry.title.clone()),
                author: Some(entry.author.clone()),
                pages: Some(entry.pages),
                description: Some(entry.description.clone()),
                image_url: Some(entry.image_url.clone()),
                stock: Some(entry.stock),
                price: Some(entry.price),
            },
        )
        .await?;
    }

    tracing::info!(
        "Seeded {} users and {} books",
        seed.users.len(),
        seed.books.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_default_seed() {
        let seed = parse_seed_config(DEFAULT_SEED).unwrap();
        assert_eq!(seed.users.len(), 3);
        assert_eq!(seed.users[0].email, "admin@biblioteca.com");
        assert_eq!(seed.users[0].role, 3);
        assert_eq!(seed.books.len(), 2);
        assert_eq!(seed.books[0].title, "Clean Code");
        assert_eq!(seed.books[0].price, 49.90);
    }

    #[test]
    fn test_parse_seed_defaults() {
        let toml_str = r#"
            [[users]]
            name = "Root"
            email = "root@teste.com"
            password = "x"

            [[books]]
            title = "Livro"
            author = "Autor"
            pages = 10
        "#;

        let seed = parse_seed_config(toml_str).unwrap();
        assert_eq!(seed.users[0].role, 1);
        assert_eq!(seed.books[0].stock, 0);
        assert_eq!(seed.books[0].description, "");
    }

    #[test]
    fn test_parse_seed_rejects_garbage() {
        assert!(matches!(
            parse_seed_config("[[users]]\nname = 3"),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_database_assigns_sequential_ids() -> Result<()> {
        let db = setup_test_db().await?;
        seed_database(&db, &parse_seed_config(DEFAULT_SEED)?).await?;

        let users = user::list_users(&db).await?;
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(users[0].role, Role::Admin);

        let books = book::list_books(&db).await?;
        assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_requires_admin_first() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = parse_seed_config(
            r#"
            [[users]]
            name = "Aluno"
            email = "aluno@teste.com"
            password = "x"
            role = 1
            "#,
        )?;

        assert!(matches!(
            seed_database(&db, &seed).await,
            Err(Error::Config { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_without_users_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = parse_seed_config(
            r#"
            [[books]]
            title = "Livro"
            author = "Autor"
            pages = 10
            "#,
        )?;

        assert!(matches!(
            seed_database(&db, &seed).await,
            Err(Error::Config { .. })
        ));
        assert!(book::list_books(&db).await?.is_empty());
        Ok(())
    }
}
