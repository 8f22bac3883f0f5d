//! Purchase business logic - buy requests and their approval workflow.
//!
//! The total is priced once, when the purchase is created, and is not affected
//! by later price changes. Stock is checked but not decremented.

use super::{TransitionPolicy, book::get_book};
use crate::{
    entities::{Purchase, PurchaseStatus, purchase, timestamp},
    errors::{Entity, Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use utoipa::ToSchema;

/// Input for [`create_purchase`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPurchase {
    /// Buying user
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    /// Book to buy
    #[serde(rename = "livroId")]
    pub book_id: i64,
    /// Number of copies
    #[serde(rename = "quantidade")]
    pub quantity: i32,
}

/// Creates a purchase in `PENDENTE`, pricing it at `quantity * price`.
///
/// The total is computed from the book's price at creation time and never
/// recomputed, even if the book is repriced later. Stock is compared against
/// the quantity but not decremented.
///
/// # Errors
/// - [`Error::InvalidQuantity`] if quantity is not positive
/// - [`Error::NotFound`] if the book does not exist
/// - [`Error::InsufficientStock`] if quantity exceeds the current stock
pub async fn create_purchase(
    db: &DatabaseConnection,
    request: NewPurchase,
) -> Result<purchase::Model> {
    if request.quantity <= 0 {
        return Err(Error::InvalidQuantity {
            quantity: request.quantity,
        });
    }

    let txn = db.begin().await?;

    let book = get_book(&txn, request.book_id).await?;
    if request.quantity > book.stock {
        return Err(Error::InsufficientStock {
            requested: request.quantity,
            available: book.stock,
        });
    }

    let created = purchase::ActiveModel {
        user_id: Set(request.user_id),
        book_id: Set(book.id),
        quantity: Set(request.quantity),
        total: Set(f64::from(request.quantity) * book.price),
        status: Set(PurchaseStatus::Pending),
        created_at: Set(timestamp::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::info!(
        "Purchase {} of {}x book {} by user {} (total {:.2})",
        created.id,
        created.quantity,
        created.book_id,
        created.user_id,
        created.total
    );
    Ok(created)
}

/// Finds a purchase by id, returning `None` if it does not exist.
pub async fn get_purchase_by_id<C>(db: &C, purchase_id: i64) -> Result<Option<purchase::Model>>
where
    C: ConnectionTrait,
{
    Purchase::find_by_id(purchase_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sets a purchase's status from its wire name.
///
/// # Errors
/// - [`Error::NotFound`] if the purchase does not exist
/// - [`Error::InvalidStatus`] if `status` is not a purchase status
/// - [`Error::InvalidTransition`] under [`TransitionPolicy::Strict`] when the
///   workflow has no such edge
pub async fn update_purchase_status(
    db: &DatabaseConnection,
    purchase_id: i64,
    status: &str,
    policy: TransitionPolicy,
) -> Result<purchase::Model> {
    let txn = db.begin().await?;

    let existing = get_purchase_by_id(&txn, purchase_id)
        .await?
        .ok_or(Error::not_found(Entity::Purchase, purchase_id))?;
    let next: PurchaseStatus = status.parse()?;
    policy.check(
        existing.status.as_str(),
        next.as_str(),
        existing.status.can_transition_to(next),
    )?;

    let previous = existing.status;
    let mut active: purchase::ActiveModel = existing.into();
    active.status = Set(next);
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    tracing::info!("Purchase {} moved from {} to {}", purchase_id, previous, next);
    Ok(updated)
}

/// Lists purchases in creation order, optionally restricted to one status.
pub async fn list_purchases(
    db: &DatabaseConnection,
    status: Option<PurchaseStatus>,
) -> Result<Vec<purchase::Model>> {
    let mut query = Purchase::find();
    if let Some(status) = status {
        query = query.filter(purchase::Column::Status.eq(status));
    }
    query
        .order_by_asc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every purchase.
pub async fn list_all_purchases(db: &DatabaseConnection) -> Result<Vec<purchase::Model>> {
    list_purchases(db, None).await
}

/// Lists the purchases awaiting approval.
pub async fn list_pending_purchases(db: &DatabaseConnection) -> Result<Vec<purchase::Model>> {
    list_purchases(db, Some(PurchaseStatus::Pending)).await
}

/// Lists one user's purchases in creation order.
pub async fn list_purchases_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<purchase::Model>> {
    Purchase::find()
        .filter(purchase::Column::UserId.eq(user_id))
        .order_by_asc(purchase::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::book::{BookChanges, create_book, update_book};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn purchase_request(book_id: i64, quantity: i32) -> NewPurchase {
        NewPurchase {
            user_id: 1,
            book_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_purchase_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        assert!(matches!(
            create_purchase(&db, purchase_request(1, 0)).await,
            Err(Error::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            create_purchase(&db, purchase_request(1, -2)).await,
            Err(Error::InvalidQuantity { quantity: -2 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_purchase_prices_total() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;

        let single = create_purchase(&db, purchase_request(book.id, 1)).await?;
        assert_eq!(single.total, book.price);
        assert_eq!(single.status, PurchaseStatus::Pending);

        let triple = create_purchase(&db, purchase_request(book.id, 3)).await?;
        assert_eq!(triple.total, 3.0 * 49.90);

        // Stock is checked, not consumed
        assert_eq!(get_book(&db, book.id).await?.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_total_is_frozen_after_price_change() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let created = create_purchase(&db, purchase_request(book.id, 2)).await?;

        update_book(
            &db,
            book.id,
            BookChanges {
                price: Some(99.0),
                ..Default::default()
            },
        )
        .await?;

        let stored = get_purchase_by_id(&db, created.id).await?.unwrap();
        assert_eq!(stored.total, 2.0 * 49.90);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_purchase_stock_checks() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_test_book(&db, "Pouco Estoque", 2).await?;

        assert!(matches!(
            create_purchase(&db, purchase_request(book.id, 5)).await,
            Err(Error::InsufficientStock {
                requested: 5,
                available: 2
            })
        ));

        // Buying exactly the remaining stock is allowed
        create_purchase(&db, purchase_request(book.id, 2)).await?;

        assert!(matches!(
            create_purchase(&db, purchase_request(9999, 1)).await,
            Err(Error::NotFound { entity: Entity::Book, .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_status_updates() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let first = create_purchase(&db, purchase_request(book.id, 1)).await?;
        let second = create_purchase(&db, purchase_request(book.id, 1)).await?;

        let approved =
            update_purchase_status(&db, first.id, "APROVADA", TransitionPolicy::Permissive)
                .await?;
        assert_eq!(approved.status, PurchaseStatus::Approved);

        let cancelled =
            update_purchase_status(&db, second.id, "CANCELADA", TransitionPolicy::Permissive)
                .await?;
        assert_eq!(cancelled.status, PurchaseStatus::Cancelled);

        // Lease spelling is not accepted for purchases
        assert!(matches!(
            update_purchase_status(&db, first.id, "APROVADO", TransitionPolicy::Permissive).await,
            Err(Error::InvalidStatus { .. })
        ));
        assert!(matches!(
            update_purchase_status(&db, 777, "APROVADA", TransitionPolicy::Permissive).await,
            Err(Error::NotFound { entity: Entity::Purchase, id: 777 })
        ));

        // Terminal states are final under the strict policy
        assert!(matches!(
            update_purchase_status(&db, first.id, "CANCELADA", TransitionPolicy::Strict).await,
            Err(Error::InvalidTransition { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_purchase_listings() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;

        let mine = create_purchase(&db, purchase_request(book.id, 1)).await?;
        let theirs = create_purchase(
            &db,
            NewPurchase {
                user_id: 3,
                book_id: book.id,
                quantity: 1,
            },
        )
        .await?;
        update_purchase_status(&db, theirs.id, "APROVADA", TransitionPolicy::Permissive).await?;

        assert_eq!(list_all_purchases(&db).await?.len(), 2);

        let pending = list_pending_purchases(&db).await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, mine.id);

        let for_user = list_purchases_for_user(&db, 3).await?;
        assert_eq!(for_user.len(), 1);
        assert_eq!(for_user[0].user_id, 3);

        Ok(())
    }
}
