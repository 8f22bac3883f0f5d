//! Book entity - Catalog entry with stock and unit price.
//!
//! A book is available while `stock > 0`. Stock gates lease and purchase creation
//! but is never decremented by those operations; callers adjust it explicitly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Book database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Livro)]
#[sea_orm(table_name = "books")]
pub struct Model {
    /// Sequential identifier, never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Title (e.g., "Clean Code")
    #[serde(rename = "nome")]
    pub title: String,
    /// Author name
    #[serde(rename = "autor")]
    pub author: String,
    /// Number of pages
    #[serde(rename = "paginas")]
    pub pages: i32,
    /// Free-text synopsis
    #[serde(rename = "descricao")]
    pub description: String,
    /// Cover image URL
    #[serde(rename = "imagemUrl")]
    pub image_url: String,
    /// When the book was registered
    #[serde(rename = "dataCadastro", serialize_with = "crate::entities::timestamp::serialize")]
    #[schema(value_type = String, format = DateTime)]
    pub registered_at: DateTimeUtc,
    /// Copies on hand, never negative
    #[serde(rename = "estoque")]
    pub stock: i32,
    /// Unit price, never negative
    #[serde(rename = "preco")]
    pub price: f64,
}

impl Model {
    /// A book is available when at least one copy is in stock.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Leases, purchases and favorites point at books by id only, so deletes never cascade.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
