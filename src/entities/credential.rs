//! Credential entity - Secret half of a user account, keyed by user id.

use sea_orm::entity::prelude::*;

/// Credential database model. Deliberately not `Serialize`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    /// Id of the owning user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    /// Password as supplied at registration (the mock backend does not hash)
    pub password: String,
}

/// Keyed by user id without a declared relation.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
