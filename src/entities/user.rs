//! User entity - Public account record.
//!
//! Holds everything about a user that may leave the process. The password lives
//! in the separate `credentials` table, so serializing a `Model` can never leak it.

use super::status::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Id of the seed administrator that can never be deleted.
pub const PRIMARY_ADMIN_ID: i64 = 1;

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Usuario)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Sequential identifier, never reused
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    #[serde(rename = "nome")]
    pub name: String,
    /// Login email, unique across users (case-sensitive)
    #[sea_orm(unique)]
    pub email: String,
    /// Account role
    #[serde(rename = "tipo")]
    #[schema(value_type = i32, minimum = 1, maximum = 3)]
    pub role: Role,
    /// When the account was created
    #[serde(rename = "dataCadastro", serialize_with = "crate::entities::timestamp::serialize")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Whether this is the protected seed administrator.
    #[must_use]
    pub const fn is_primary_admin(&self) -> bool {
        self.id == PRIMARY_ADMIN_ID
    }
}

/// Users reference nothing; other tables point at them by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
