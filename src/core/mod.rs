//! Core business logic - framework-agnostic library operations.
//!
//! Every operation takes the store connection explicitly, validates against the
//! current state, mutates it in a single step and returns either the resulting
//! entity or a typed [`crate::errors::Error`].

/// Catalog management: listing, lookup, create, merge-update, delete
pub mod book;
/// Per-user favorite books
pub mod favorite;
/// Lease creation, status workflow and listings
pub mod lease;
/// Purchase creation, status workflow and listings
pub mod purchase;
/// Aggregate counts over the whole store
pub mod statistics;
/// Registration, login and account management
pub mod user;

use crate::errors::{Error, Result};
use std::str::FromStr;

/// How status updates on leases and purchases are validated.
///
/// Both policies reject unrecognized status strings. `Permissive` then overwrites
/// the status unconditionally; `Strict` also requires the change to be an edge of
/// the workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any recognized status may replace any other
    #[default]
    Permissive,
    /// Only workflow edges are accepted
    Strict,
}

impl TransitionPolicy {
    /// Checks a requested change given whether the workflow has that edge.
    pub(crate) fn check(self, from: &str, to: &str, edge_exists: bool) -> Result<()> {
        if self == Self::Strict && !edge_exists {
            return Err(Error::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for TransitionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(Error::Config {
                message: format!("Unknown status policy '{other}' (expected permissive or strict)"),
            }),
        }
    }
}
