//! Library statistics.
//!
//! A snapshot is computed inside one transaction, so the per-role user counts
//! always add up to the user total.

use crate::{
    entities::{
        Book, Lease, LeaseStatus, Purchase, PurchaseStatus, Role, User, lease, purchase, user,
    },
    errors::Result,
};
use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};
use serde::Serialize;
use utoipa::ToSchema;

/// User counts by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct UsersByRole {
    /// Students (`tipo` 1)
    #[serde(rename = "alunos")]
    pub students: u64,
    /// Staff (`tipo` 2)
    #[serde(rename = "funcionarios")]
    pub staff: u64,
    /// Administrators (`tipo` 3)
    #[serde(rename = "admins")]
    pub admins: u64,
}

impl UsersByRole {
    /// Sum over all roles.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.students + self.staff + self.admins
    }
}

/// Point-in-time aggregate over the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(as = Estatisticas)]
pub struct Statistics {
    /// Number of books in the catalog
    #[serde(rename = "totalLivros")]
    pub total_books: u64,
    /// Pages summed over every book
    #[serde(rename = "totalPaginas")]
    pub total_pages: i64,
    /// Number of registered users
    #[serde(rename = "totalUsuarios")]
    pub total_users: u64,
    /// Users broken down by role
    #[serde(rename = "usuariosPorTipo")]
    pub users_by_role: UsersByRole,
    /// Books with stock > 0
    #[serde(rename = "livrosDisponiveis")]
    pub available_books: u64,
    /// Leases in `PENDENTE`
    #[serde(rename = "arrendamentosPendentes")]
    pub pending_leases: u64,
    /// Purchases in `PENDENTE`
    #[serde(rename = "comprasPendentes")]
    pub pending_purchases: u64,
}

async fn count_role<C>(db: &C, role: Role) -> Result<u64>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Role.eq(role))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Computes the current statistics snapshot.
///
/// All counters are read inside one transaction, so the per-role counts always
/// add up to the user total. Nothing is cached: every call queries the store.
pub async fn get_statistics(db: &DatabaseConnection) -> Result<Statistics> {
    let txn = db.begin().await?;

    let books = Book::find().all(&txn).await?;
    let total_books = books.len() as u64;
    let total_pages = books.iter().map(|b| i64::from(b.pages)).sum();
    let available_books = books.iter().filter(|b| b.is_available()).count() as u64;

    let users_by_role = UsersByRole {
        students: count_role(&txn, Role::Student).await?,
        staff: count_role(&txn, Role::Staff).await?,
        admins: count_role(&txn, Role::Admin).await?,
    };
    let total_users = User::find().count(&txn).await?;

    let pending_leases = Lease::find()
        .filter(lease::Column::Status.eq(LeaseStatus::Pending))
        .count(&txn)
        .await?;
    let pending_purchases = Purchase::find()
        .filter(purchase::Column::Status.eq(PurchaseStatus::Pending))
        .count(&txn)
        .await?;

    txn.commit().await?;

    debug_assert_eq!(users_by_role.total(), total_users);

    Ok(Statistics {
        total_books,
        total_pages,
        total_users,
        users_by_role,
        available_books,
        pending_leases,
        pending_purchases,
    })
}
