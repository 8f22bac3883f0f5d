//! Route handlers grouped by resource.

/// Registration and login
pub mod auth;
/// Catalog CRUD
pub mod books;
/// Favorites
pub mod favorites;
/// Lease workflow
pub mod leases;
/// Purchase workflow
pub mod purchases;
/// Store-wide counters
pub mod statistics;
/// Account management
pub mod users;

use crate::errors::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Body of the `PUT .../:id/status` routes.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// Requested status name, validated against the resource's state machine
    #[serde(default)]
    pub status: String,
}

/// `?status=` filter on the list routes.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    /// Status name, or absent for no filter
    pub status: Option<String>,
}

/// `?usuarioId=` on the `/me` routes.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    /// Owning user
    #[serde(rename = "usuarioId")]
    pub user_id: Option<i64>,
}

impl OwnerQuery {
    /// The user id, which the `/me` routes require.
    pub fn required(&self) -> Result<i64> {
        self.user_id.ok_or_else(|| Error::MissingFields {
            message: "usuarioId é obrigatório".to_string(),
        })
    }
}

/// Parses an optional status filter, rejecting unknown names.
fn parse_filter<S>(filter: StatusFilter) -> Result<Option<S>>
where
    S: std::str::FromStr<Err = Error>,
{
    filter
        .status
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .transpose()
}

/// `{"mensagem": message}`
pub(crate) fn message(text: &str) -> Value {
    json!({ "mensagem": text })
}
