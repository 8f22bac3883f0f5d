//! Lease entity - Time-bounded borrowing request with an approval workflow.
//!
//! Leases are never deleted; rejection and return are status changes.

use super::status::LeaseStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lease database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Arrendamento)]
#[sea_orm(table_name = "leases")]
pub struct Model {
    /// Sequential identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Borrowing user
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    /// Borrowed book
    #[serde(rename = "livroId")]
    pub book_id: i64,
    /// Requested start, as sent by the client
    #[serde(rename = "dataInicio")]
    pub start_date: Option<String>,
    /// Requested end, as sent by the client
    #[serde(rename = "dataFim")]
    pub end_date: Option<String>,
    /// Workflow state
    pub status: LeaseStatus,
    /// When the request was made
    #[serde(rename = "criadoEm", serialize_with = "crate::entities::timestamp::serialize")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeUtc,
}

/// No relations: referencing ids are plain columns and deletes never cascade.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
