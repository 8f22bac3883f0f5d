//! Unified error type for the library backend.
//!
//! Domain failures are recoverable and reported to the caller as values; the HTTP
//! layer decides how each one is presented on the wire.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use thiserror::Error;

/// Every failure the backend can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity that was looked up
        entity: Entity,
        /// Identifier that did not resolve
        id: i64,
    },

    /// Another user already owns this email address.
    #[error("Email already registered: {email}")]
    DuplicateEmail {
        /// The conflicting email
        email: String,
    },

    /// The (user, book) favorite pair already exists.
    #[error("Book {book_id} is already a favorite of user {user_id}")]
    DuplicateFavorite {
        /// Owner of the favorite
        user_id: i64,
        /// Favorited book
        book_id: i64,
    },

    /// A required input field is absent or empty.
    #[error("Missing required fields: {message}")]
    MissingFields {
        /// Client-facing description of the expected fields
        message: String,
    },

    /// A lease was requested against a book with no stock.
    #[error("Book {book_id} is out of stock")]
    OutOfStock {
        /// The book with zero stock
        book_id: i64,
    },

    /// A purchase asked for more copies than the book has.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity requested
        requested: i32,
        /// Stock at the time of the request
        available: i32,
    },

    /// Purchase quantity must be a positive integer.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Stock or price outside the allowed range.
    #[error("Invalid {field}: {value}")]
    InvalidAmount {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The status string is not part of the relevant state machine.
    #[error("Invalid status: {status}")]
    InvalidStatus {
        /// The unrecognized status
        status: String,
    },

    /// The status is recognized but the edge is not allowed under the strict policy.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Email/password pair did not match any user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Attempt to mutate a protected entity.
    #[error("Forbidden: {message}")]
    ForbiddenOperation {
        /// Client-facing description of what was refused
        message: String,
    },

    /// Request body could not be decoded.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Store failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (binding the listener, reading files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Entity kinds used in [`Error::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A registered user
    User,
    /// A catalog book
    Book,
    /// A user's favorite
    Favorite,
    /// A lease request
    Lease,
    /// A purchase request
    Purchase,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::User => "User",
            Self::Book => "Book",
            Self::Favorite => "Favorite",
            Self::Lease => "Lease",
            Self::Purchase => "Purchase",
        };
        f.write_str(name)
    }
}

impl Error {
    pub(crate) const fn not_found(entity: Entity, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Self::MalformedRequest(value.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(value: PathRejection) -> Self {
        Self::MalformedRequest(value.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        Self::MalformedRequest(value.body_text())
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
