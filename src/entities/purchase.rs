//! Purchase entity - Quantity-and-total buy request with an approval workflow.
//!
//! `total` is computed once from the book price at creation and never recomputed.
//! Purchases are never deleted; cancellation is a status change.

use super::status::PurchaseStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Compra)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Sequential identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Buying user
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    /// Purchased book
    #[serde(rename = "livroId")]
    pub book_id: i64,
    /// Number of copies, always positive
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    /// `quantity * price` frozen at creation
    pub total: f64,
    /// Workflow state
    pub status: PurchaseStatus,
    /// When the request was made
    #[serde(rename = "criadoEm", serialize_with = "crate::entities::timestamp::serialize")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeUtc,
}

/// Relations (none declared)
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
