//! Entity module - Contains all SeaORM entity definitions for the in-memory store.
//! Each entity has a Model struct for data and an Entity struct for operations.
//! Models serialize with the Portuguese field names the HTTP clients expect.
//!
//! No relations are declared between tables: references are plain id columns, so
//! deleting a book or user never cascades and may leave orphaned ids behind.

pub mod book;
pub mod credential;
pub mod favorite;
pub mod lease;
pub mod purchase;
pub mod status;
pub mod timestamp;
pub mod user;

// Re-export specific types to avoid conflicts
pub use book::{Column as BookColumn, Entity as Book, Model as BookModel};
pub use credential::{Column as CredentialColumn, Entity as Credential, Model as CredentialModel};
pub use favorite::{Column as FavoriteColumn, Entity as Favorite, Model as FavoriteModel};
pub use lease::{Column as LeaseColumn, Entity as Lease, Model as LeaseModel};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
pub use status::{LeaseStatus, PurchaseStatus, Role};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
