//! Favorite business logic - per-user bookmarked books.

use crate::{
    entities::{Favorite, favorite, timestamp},
    errors::{Entity, Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

async fn find_pair<C>(db: &C, book_id: i64, user_id: i64) -> Result<Option<favorite::Model>>
where
    C: ConnectionTrait,
{
    Favorite::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::BookId.eq(book_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Marks a book as a favorite of a user.
///
/// The ids are not checked against the users and books tables.
///
/// # Errors
/// [`Error::DuplicateFavorite`] if the user already favorited this book.
pub async fn add_favorite(
    db: &DatabaseConnection,
    book_id: i64,
    user_id: i64,
) -> Result<favorite::Model> {
    let txn = db.begin().await?;

    if find_pair(&txn, book_id, user_id).await?.is_some() {
        return Err(Error::DuplicateFavorite { user_id, book_id });
    }

    let created = favorite::ActiveModel {
        user_id: Set(user_id),
        book_id: Set(book_id),
        created_at: Set(timestamp::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::debug!("User {} favorited book {}", user_id, book_id);
    Ok(created)
}

/// Removes a favorite.
///
/// # Errors
/// [`Error::NotFound`] (reported against the book id) if the pair does not exist.
pub async fn remove_favorite(db: &DatabaseConnection, book_id: i64, user_id: i64) -> Result<()> {
    let result = Favorite::delete_many()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::BookId.eq(book_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::not_found(Entity::Favorite, book_id));
    }
    Ok(())
}

/// Lists a user's favorites in the order they were added.
///
/// An unknown user simply has no favorites.
pub async fn list_favorites(db: &DatabaseConnection, user_id: i64) -> Result<Vec<favorite::Model>> {
    Favorite::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .order_by_asc(favorite::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
