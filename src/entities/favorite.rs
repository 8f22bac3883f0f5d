//! Favorite entity - A (user, book) bookmark. Each pair exists at most once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Favorite database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Favorito)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    /// Sequential identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    #[serde(rename = "usuarioId")]
    pub user_id: i64,
    /// Favorited book
    #[serde(rename = "livroId")]
    pub book_id: i64,
    /// When the favorite was added
    #[serde(rename = "criadoEm", serialize_with = "crate::entities::timestamp::serialize")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeUtc,
}

/// No relations: referencing ids are plain columns and deletes never cascade.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
