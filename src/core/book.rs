//! Book business logic - catalog listing, lookup and maintenance.
//!
//! Updates are merges: only the fields present in [`BookChanges`] are written.
//! Deleting a book does not touch leases, purchases or favorites that reference it.

use crate::{
    entities::{Book, book, timestamp},
    errors::{Entity, Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use utoipa::ToSchema;

/// Input for [`create_book`]. Title, author and page count are mandatory.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewBook {
    /// Title
    #[serde(rename = "nome")]
    pub title: Option<String>,
    /// Author
    #[serde(rename = "autor")]
    pub author: Option<String>,
    /// Page count, must be non-zero
    #[serde(rename = "paginas")]
    pub pages: Option<i32>,
    /// Synopsis
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// Cover image URL
    #[serde(rename = "imagemUrl")]
    pub image_url: Option<String>,
    /// Copies on hand (defaults to 0)
    #[serde(rename = "estoque")]
    pub stock: Option<i32>,
    /// Unit price (defaults to 0)
    #[serde(rename = "preco")]
    pub price: Option<f64>,
}

/// Partial update for [`update_book`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookChanges {
    /// New title
    #[serde(rename = "nome")]
    pub title: Option<String>,
    /// New author
    #[serde(rename = "autor")]
    pub author: Option<String>,
    /// New page count
    #[serde(rename = "paginas")]
    pub pages: Option<i32>,
    /// New synopsis
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    /// New cover image URL
    #[serde(rename = "imagemUrl")]
    pub image_url: Option<String>,
    /// New stock level
    #[serde(rename = "estoque")]
    pub stock: Option<i32>,
    /// New unit price
    #[serde(rename = "preco")]
    pub price: Option<f64>,
}

const REQUIRED_FIELDS: &str = "Nome, autor e páginas são obrigatórios";

fn missing_fields() -> Error {
    Error::MissingFields {
        message: REQUIRED_FIELDS.to_string(),
    }
}

fn validate_pages(pages: i32) -> Result<()> {
    if pages < 0 {
        return Err(Error::InvalidAmount {
            field: "pages",
            value: f64::from(pages),
        });
    }
    Ok(())
}

fn validate_stock(stock: i32) -> Result<()> {
    if stock < 0 {
        return Err(Error::InvalidAmount {
            field: "stock",
            value: f64::from(stock),
        });
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount {
            field: "price",
            value: price,
        });
    }
    Ok(())
}

/// Retrieves all books in insertion order.
pub async fn list_books(db: &DatabaseConnection) -> Result<Vec<book::Model>> {
    Book::find()
        .order_by_asc(book::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the books with at least one copy in stock, in insertion order.
pub async fn list_available_books(db: &DatabaseConnection) -> Result<Vec<book::Model>> {
    Book::find()
        .filter(book::Column::Stock.gt(0))
        .order_by_asc(book::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a book by id, returning `None` if it does not exist.
pub async fn get_book_by_id<C>(db: &C, book_id: i64) -> Result<Option<book::Model>>
where
    C: ConnectionTrait,
{
    Book::find_by_id(book_id).one(db).await.map_err(Into::into)
}

/// Finds a book by id.
///
/// # Errors
/// [`Error::NotFound`] if no book has this id.
pub async fn get_book<C>(db: &C, book_id: i64) -> Result<book::Model>
where
    C: ConnectionTrait,
{
    get_book_by_id(db, book_id)
        .await?
        .ok_or(Error::not_found(Entity::Book, book_id))
}

/// Registers a new book, stamping its registration time.
///
/// # Errors
/// - [`Error::MissingFields`] if title or author is blank or the page count is absent or zero
/// - [`Error::InvalidAmount`] for a negative page count or stock, or a negative/non-finite price
pub async fn create_book(db: &DatabaseConnection, new_book: NewBook) -> Result<book::Model> {
    let (Some(title), Some(author), Some(pages)) = (
        new_book.title.filter(|t| !t.trim().is_empty()),
        new_book.author.filter(|a| !a.trim().is_empty()),
        new_book.pages.filter(|p| *p != 0),
    ) else {
        return Err(missing_fields());
    };
    validate_pages(pages)?;

    let stock = new_book.stock.unwrap_or(0);
    let price = new_book.price.unwrap_or(0.0);
    validate_stock(stock)?;
    validate_price(price)?;

    let created = book::ActiveModel {
        title: Set(title),
        author: Set(author),
        pages: Set(pages),
        description: Set(new_book.description.unwrap_or_default()),
        image_url: Set(new_book.image_url.unwrap_or_default()),
        registered_at: Set(timestamp::now()),
        stock: Set(stock),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("Created book {} '{}'", created.id, created.title);
    Ok(created)
}

/// Merges the supplied fields over an existing book.
///
/// Supplied fields follow the same rules as on creation: a title or author may
/// not be blanked, the page count may not become zero, and no amount may go
/// negative. The registration timestamp never changes.
///
/// # Errors
/// - [`Error::MissingFields`] for a blank title or author or a zero page count
/// - [`Error::InvalidAmount`] for a negative page count or stock, or a negative/non-finite price
/// - [`Error::NotFound`] if the book does not exist
pub async fn update_book(
    db: &DatabaseConnection,
    book_id: i64,
    changes: BookChanges,
) -> Result<book::Model> {
    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
    if blank(&changes.title) || blank(&changes.author) || changes.pages == Some(0) {
        return Err(missing_fields());
    }
    if let Some(pages) = changes.pages {
        validate_pages(pages)?;
    }
    if let Some(stock) = changes.stock {
        validate_stock(stock)?;
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
    }

    let txn = db.begin().await?;

    let existing = get_book(&txn, book_id).await?;
    let mut active: book::ActiveModel = existing.clone().into();
    if let Some(title) = changes.title {
        active.title = Set(title);
    }
    if let Some(author) = changes.author {
        active.author = Set(author);
    }
    if let Some(pages) = changes.pages {
        active.pages = Set(pages);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(image_url) = changes.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(stock) = changes.stock {
        active.stock = Set(stock);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }

    if !active.is_changed() {
        return Ok(existing);
    }
    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::debug!("Updated book {}", book_id);
    Ok(updated)
}

/// Permanently removes a book.
///
/// # Errors
/// [`Error::NotFound`] if the book does not exist.
pub async fn delete_book(db: &DatabaseConnection, book_id: i64) -> Result<()> {
    let result = Book::delete_by_id(book_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(Entity::Book, book_id));
    }
    tracing::info!("Deleted book {}", book_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_book_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty title and author, null pages
        let incomplete = NewBook {
            title: Some(String::new()),
            author: Some(String::new()),
            pages: None,
            ..Default::default()
        };
        assert!(matches!(
            create_book(&db, incomplete).await,
            Err(Error::MissingFields { .. })
        ));

        // Zero pages counts as missing
        let mut zero_pages = clean_code();
        zero_pages.pages = Some(0);
        assert!(matches!(
            create_book(&db, zero_pages).await,
            Err(Error::MissingFields { .. })
        ));

        let mut negative_stock = clean_code();
        negative_stock.stock = Some(-1);
        assert!(matches!(
            create_book(&db, negative_stock).await,
            Err(Error::InvalidAmount { field: "stock", .. })
        ));

        let mut nan_price = clean_code();
        nan_price.price = Some(f64::NAN);
        assert!(matches!(
            create_book(&db, nan_price).await,
            Err(Error::InvalidAmount { field: "price", .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_book_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_book(&db, clean_code()).await?;
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Clean Code");
        assert_eq!(created.author, "Robert C. Martin");
        assert_eq!(created.pages, 464);
        assert_eq!(created.stock, 5);
        assert_eq!(created.price, 49.90);
        assert!(created.is_available());

        let fetched = get_book(&db, created.id).await?;
        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_fields_default() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_book(
            &db,
            NewBook {
                title: Some("Sem Estoque".to_string()),
                author: Some("Anônimo".to_string()),
                pages: Some(10),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(created.stock, 0);
        assert_eq!(created.price, 0.0);
        assert_eq!(created.description, "");
        assert!(!created.is_available());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_available_books_filters_stock() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_book(&db, clean_code()).await?;
        let empty = create_test_book(&db, "Esgotado", 0).await?;
        let third = create_test_book(&db, "Disponível", 2).await?;

        let all = list_books(&db).await?;
        assert_eq!(
            all.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![first.id, empty.id, third.id]
        );

        let available = list_available_books(&db).await?;
        assert_eq!(
            available.iter().map(|b| b.id).collect::<Vec<_>>(),
            vec![first.id, third.id]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_book_merges_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_book(&db, clean_code()).await?;

        let updated = update_book(
            &db,
            created.id,
            BookChanges {
                stock: Some(0),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.stock, 0);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.registered_at, created.registered_at);

        let renamed = update_book(
            &db,
            created.id,
            BookChanges {
                title: Some("Clean Code - Edição Atualizada".to_string()),
                price: Some(79.9),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(renamed.title, "Clean Code - Edição Atualizada");
        assert_eq!(renamed.price, 79.9);
        assert_eq!(renamed.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_book_errors() -> Result<()> {
        let db = setup_test_db().await?;

        let missing = update_book(&db, 9999, BookChanges::default()).await;
        assert!(matches!(
            missing,
            Err(Error::NotFound { entity: Entity::Book, id: 9999 })
        ));

        let created = create_book(&db, clean_code()).await?;
        let negative = update_book(
            &db,
            created.id,
            BookChanges {
                stock: Some(-3),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(negative, Err(Error::InvalidAmount { .. })));
        assert_eq!(get_book(&db, created.id).await?.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_book() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_book(&db, clean_code()).await?;

        delete_book(&db, created.id).await?;
        assert!(get_book_by_id(&db, created.id).await?.is_none());
        assert!(matches!(
            delete_book(&db, created.id).await,
            Err(Error::NotFound { entity: Entity::Book, .. })
        ));

        // Ids keep increasing after a delete
        let next = create_book(&db, clean_code()).await?;
        assert!(next.id > created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_page_count_cannot_go_negative() -> Result<()> {
        let db = setup_test_db().await?;

        let mut negative = clean_code();
        negative.pages = Some(-10);
        assert!(matches!(
            create_book(&db, negative).await,
            Err(Error::InvalidAmount { field: "pages", .. })
        ));

        let created = create_book(&db, clean_code()).await?;
        let result = update_book(
            &db,
            created.id,
            BookChanges {
                pages: Some(-464),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { field: "pages", .. })));
        assert_eq!(get_book(&db, created.id).await?.pages, 464);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_book_keeps_required_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_book(&db, clean_code()).await?;

        for changes in [
            BookChanges {
                title: Some("  ".to_string()),
                ..Default::default()
            },
            BookChanges {
                author: Some(String::new()),
                ..Default::default()
            },
            BookChanges {
                pages: Some(0),
                ..Default::default()
            },
        ] {
            assert!(matches!(
                update_book(&db, created.id, changes).await,
                Err(Error::MissingFields { .. })
            ));
        }

        let stored = get_book(&db, created.id).await?;
        assert_eq!(stored.title, "Clean Code");
        assert_eq!(stored.author, "Robert C. Martin");
        assert_eq!(stored.pages, 464);

        // An empty change set returns the book untouched
        let unchanged = update_book(&db, created.id, BookChanges::default()).await?;
        assert_eq!(unchanged, stored);

        Ok(())
    }
}
