//! Enumerations stored in entity columns: user roles and the lease/purchase status machines.
//!
//! Statuses are persisted and serialized as the uppercase Portuguese strings the
//! clients send (`PENDENTE`, `APROVADO`, ...). Roles are persisted and serialized as
//! the integers 1-3.

use crate::errors::Error;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use std::{fmt, str::FromStr};

/// Account role. `Student` is the default for new registrations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(into = "i32", try_from = "i32")]
pub enum Role {
    /// Aluno
    #[default]
    #[sea_orm(num_value = 1)]
    Student,
    /// Funcionário
    #[sea_orm(num_value = 2)]
    Staff,
    /// Administrador
    #[sea_orm(num_value = 3)]
    Admin,
}

impl Role {
    /// Interprets a loosely typed role value the way forms send it: a number or a
    /// numeric string. Returns `None` for anything else, including codes outside 1-3.
    #[must_use]
    pub fn parse_loose(value: &serde_json::Value) -> Option<Self> {
        let code = match value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        code.and_then(|c| i32::try_from(c).ok())
            .and_then(|c| Self::try_from(c).ok())
    }

    /// `deserialize_with` adapter for optional `tipo` fields.
    ///
    /// Registration and user updates both accept `tipo` through this, so `2` and
    /// `"2"` mean the same thing everywhere. Absent, null or unrecognized values
    /// come back as `None`; each caller decides what that means.
    pub fn deserialize_loose<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(Self::parse_loose))
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => 1,
            Role::Staff => 2,
            Role::Admin => 3,
        }
    }
}

impl TryFrom<i32> for Role {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Student),
            2 => Ok(Self::Staff),
            3 => Ok(Self::Admin),
            other => Err(format!("unknown role {other}")),
        }
    }
}

/// Lease workflow: `PENDENTE -> {APROVADO, REJEITADO}`, `APROVADO -> DEVOLVIDO`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum LeaseStatus {
    /// Awaiting approval (initial state)
    #[sea_orm(string_value = "PENDENTE")]
    #[serde(rename = "PENDENTE")]
    Pending,
    /// Approved by staff
    #[sea_orm(string_value = "APROVADO")]
    #[serde(rename = "APROVADO")]
    Approved,
    /// Rejected by staff (terminal)
    #[sea_orm(string_value = "REJEITADO")]
    #[serde(rename = "REJEITADO")]
    Rejected,
    /// Book given back (terminal)
    #[sea_orm(string_value = "DEVOLVIDO")]
    #[serde(rename = "DEVOLVIDO")]
    Returned,
}

impl LeaseStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::Approved => "APROVADO",
            Self::Rejected => "REJEITADO",
            Self::Returned => "DEVOLVIDO",
        }
    }

    /// Whether the lease workflow has an edge from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Returned)
        )
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(Self::Pending),
            "APROVADO" => Ok(Self::Approved),
            "REJEITADO" => Ok(Self::Rejected),
            "DEVOLVIDO" => Ok(Self::Returned),
            other => Err(Error::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Purchase workflow: `PENDENTE -> {APROVADA, CANCELADA}`; both targets are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PurchaseStatus {
    /// Awaiting approval (initial state)
    #[sea_orm(string_value = "PENDENTE")]
    #[serde(rename = "PENDENTE")]
    Pending,
    /// Approved (terminal)
    #[sea_orm(string_value = "APROVADA")]
    #[serde(rename = "APROVADA")]
    Approved,
    /// Cancelled (terminal)
    #[sea_orm(string_value = "CANCELADA")]
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl PurchaseStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDENTE",
            Self::Approved => "APROVADA",
            Self::Cancelled => "CANCELADA",
        }
    }

    /// Whether the purchase workflow has an edge from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Approved | Self::Cancelled))
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDENTE" => Ok(Self::Pending),
            "APROVADA" => Ok(Self::Approved),
            "CANCELADA" => Ok(Self::Cancelled),
            other => Err(Error::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}
