//! Lease business logic - borrowing requests and their approval workflow.
//!
//! A lease can only be requested while the book has stock, but creating one does
//! not reserve or decrement that stock. Leases are never deleted.

use super::{TransitionPolicy, book::get_book};
use crate::{
    entities::{Lease, LeaseStatus, lease, timestamp},
    errors::{Entity, Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use utoipa::ToSchema;

/// Input for [`create_lease`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewLease {
    /// Book to borrow
    #[serde(rename = "livroId")]
    pub book_id: i64,
    /// Borrowing user
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    /// Requested start date
    #[serde(rename = "dataInicio", default)]
    pub start_date: Option<String>,
    /// Requested end date
    #[serde(rename = "dataFim", default)]
    pub end_date: Option<String>,
}

/// Requests a lease, starting in `PENDENTE`.
///
/// The book must exist and have at least one copy in stock when the request
/// is made. Stock is only checked here, never reserved, so several pending
/// leases may point at the last copy. The dates are stored as sent.
///
/// # Errors
/// - [`Error::NotFound`] if the book does not exist
/// - [`Error::OutOfStock`] if the book has no copies in stock
pub async fn create_lease(db: &DatabaseConnection, request: NewLease) -> Result<lease::Model> {
    let txn = db.begin().await?;

    let book = get_book(&txn, request.book_id).await?;
    if !book.is_available() {
        return Err(Error::OutOfStock { book_id: book.id });
    }

    let created = lease::ActiveModel {
        user_id: Set(request.user_id),
        book_id: Set(book.id),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        status: Set(LeaseStatus::Pending),
        created_at: Set(timestamp::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::info!(
        "Lease {} requested by user {} for book {}",
        created.id,
        created.user_id,
        created.book_id
    );
    Ok(created)
}

/// Finds a lease by id, returning `None` if it does not exist.
pub async fn get_lease_by_id<C>(db: &C, lease_id: i64) -> Result<Option<lease::Model>>
where
    C: ConnectionTrait,
{
    Lease::find_by_id(lease_id).one(db).await.map_err(Into::into)
}

/// Sets a lease's status from its wire name.
///
/// The lease is looked up before the name is parsed, so an unknown id wins
/// over an unknown status. Under [`TransitionPolicy::Permissive`] any known
/// status replaces any other; the lookup and write share one transaction.
///
/// # Errors
/// - [`Error::NotFound`] if the lease does not exist
/// - [`Error::InvalidStatus`] if `status` is not a lease status
/// - [`Error::InvalidTransition`] under [`TransitionPolicy::Strict`] when the
///   workflow has no such edge
pub async fn update_lease_status(
    db: &DatabaseConnection,
    lease_id: i64,
    status: &str,
    policy: TransitionPolicy,
) -> Result<lease::Model> {
    let txn = db.begin().await?;

    let existing = get_lease_by_id(&txn, lease_id)
        .await?
        .ok_or(Error::not_found(Entity::Lease, lease_id))?;
    let next: LeaseStatus = status.parse()?;
    policy.check(
        existing.status.as_str(),
        next.as_str(),
        existing.status.can_transition_to(next),
    )?;

    let previous = existing.status;
    let mut active: lease::ActiveModel = existing.into();
    active.status = Set(next);
    let updated = active.update(&txn).await?;

    txn.commit().await?;
    tracing::info!("Lease {} moved from {} to {}", lease_id, previous, next);
    Ok(updated)
}

/// Lists leases in creation order, optionally restricted to one status.
pub async fn list_leases(
    db: &DatabaseConnection,
    status: Option<LeaseStatus>,
) -> Result<Vec<lease::Model>> {
    let mut query = Lease::find();
    if let Some(status) = status {
        query = query.filter(lease::Column::Status.eq(status));
    }
    query
        .order_by_asc(lease::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the leases awaiting approval.
pub async fn list_pending_leases(db: &DatabaseConnection) -> Result<Vec<lease::Model>> {
    list_leases(db, Some(LeaseStatus::Pending)).await
}

/// Lists one user's leases in creation order.
pub async fn list_leases_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<lease::Model>> {
    Lease::find()
        .filter(lease::Column::UserId.eq(user_id))
        .order_by_asc(lease::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::book::{BookChanges, create_book, update_book};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_lease_starts_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;

        let lease = create_lease(&db, lease_request(book.id, 1)).await?;
        assert_eq!(lease.status, LeaseStatus::Pending);
        assert_eq!(lease.book_id, book.id);
        assert_eq!(lease.user_id, 1);
        assert!(lease.start_date.is_some());

        // Creating a lease does not consume stock
        assert_eq!(get_book(&db, book.id).await?.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_lease_rejects_missing_or_empty_book() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(matches!(
            create_lease(&db, lease_request(9999, 1)).await,
            Err(Error::NotFound { entity: Entity::Book, id: 9999 })
        ));

        let book = create_test_book(&db, "Esgotado", 0).await?;
        assert!(matches!(
            create_lease(&db, lease_request(book.id, 1)).await,
            Err(Error::OutOfStock { .. })
        ));
        assert!(list_leases(&db, None).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_clean_code_lease_workflow() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let lease = create_lease(&db, lease_request(book.id, 1)).await?;

        let approved =
            update_lease_status(&db, lease.id, "APROVADO", TransitionPolicy::Permissive).await?;
        assert_eq!(approved.id, lease.id);
        assert_eq!(approved.status, LeaseStatus::Approved);

        let invalid =
            update_lease_status(&db, lease.id, "INVALIDO", TransitionPolicy::Permissive).await;
        assert!(matches!(invalid, Err(Error::InvalidStatus { status }) if status == "INVALIDO"));

        // The failed update left the lease untouched
        let current = get_lease_by_id(&db, lease.id).await?.unwrap();
        assert_eq!(current.status, LeaseStatus::Approved);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_lease_status_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            update_lease_status(&db, 42, "APROVADO", TransitionPolicy::Permissive).await,
            Err(Error::NotFound { entity: Entity::Lease, id: 42 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_permissive_policy_allows_any_recognized_status() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let lease = create_lease(&db, lease_request(book.id, 1)).await?;

        update_lease_status(&db, lease.id, "DEVOLVIDO", TransitionPolicy::Permissive).await?;
        let back =
            update_lease_status(&db, lease.id, "APROVADO", TransitionPolicy::Permissive).await?;
        assert_eq!(back.status, LeaseStatus::Approved);

        Ok(())
    }

    #[tokio::test]
    async fn test_strict_policy_enforces_workflow() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let lease = create_lease(&db, lease_request(book.id, 1)).await?;

        let skipped =
            update_lease_status(&db, lease.id, "DEVOLVIDO", TransitionPolicy::Strict).await;
        assert!(matches!(skipped, Err(Error::InvalidTransition { .. })));

        update_lease_status(&db, lease.id, "APROVADO", TransitionPolicy::Strict).await?;
        let returned =
            update_lease_status(&db, lease.id, "DEVOLVIDO", TransitionPolicy::Strict).await?;
        assert_eq!(returned.status, LeaseStatus::Returned);

        let reopened =
            update_lease_status(&db, lease.id, "APROVADO", TransitionPolicy::Strict).await;
        assert!(matches!(reopened, Err(Error::InvalidTransition { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_lease_listings() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;

        let first = create_lease(&db, lease_request(book.id, 1)).await?;
        let second = create_lease(&db, lease_request(book.id, 3)).await?;
        let third = create_lease(&db, lease_request(book.id, 1)).await?;
        update_lease_status(&db, second.id, "REJEITADO", TransitionPolicy::Permissive).await?;

        let pending = list_pending_leases(&db).await?;
        assert_eq!(
            pending.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![first.id, third.id]
        );

        let mine = list_leases_for_user(&db, 1).await?;
        assert!(mine.iter().all(|l| l.user_id == 1));
        assert_eq!(mine.len(), 2);

        assert_eq!(list_leases(&db, None).await?.len(), 3);
        assert_eq!(
            list_leases(&db, Some(LeaseStatus::Rejected)).await?[0].id,
            second.id
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_existing_lease_survives_stock_drop_and_book_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let book = create_book(&db, clean_code()).await?;
        let lease = create_lease(&db, lease_request(book.id, 1)).await?;

        update_book(
            &db,
            book.id,
            BookChanges {
                stock: Some(0),
                ..Default::default()
            },
        )
        .await?;
        crate::core::book::delete_book(&db, book.id).await?;

        // Orphaned lease is still listed and still updatable
        let orphan = get_lease_by_id(&db, lease.id).await?.unwrap();
        assert_eq!(orphan.book_id, book.id);
        update_lease_status(&db, lease.id, "APROVADO", TransitionPolicy::Permissive).await?;

        Ok(())
    }
}
