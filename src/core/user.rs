//! User business logic - registration, login and account management.
//!
//! Passwords are written to the `credentials` table only. Every function here
//! returns the public [`user::Model`], which has no password field to strip.

use crate::{
    entities::{Credential, Role, User, credential, timestamp, user},
    errors::{Entity, Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use utoipa::ToSchema;

/// Input for [`register`].
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Account role
    pub role: Role,
}

/// Partial update for [`update_user`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserChanges {
    /// New display name
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// New login email, still unique across users
    pub email: Option<String>,
    /// New password
    #[serde(rename = "senha")]
    pub password: Option<String>,
    /// New role, as a number or numeric string; unrecognized values keep the current role
    #[serde(rename = "tipo", default, deserialize_with = "Role::deserialize_loose")]
    #[schema(value_type = Option<i32>)]
    pub role: Option<Role>,
}

/// Finds a user by exact (case-sensitive) email.
pub async fn get_user_by_email<C>(db: &C, email: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by id.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Creates an account and its credential.
///
/// # Errors
/// - [`Error::MissingFields`] if name, email or password is blank
/// - [`Error::DuplicateEmail`] if any user already has this email
pub async fn register(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    if new_user.name.trim().is_empty()
        || new_user.email.trim().is_empty()
        || new_user.password.is_empty()
    {
        return Err(Error::MissingFields {
            message: "Nome, email e senha são obrigatórios".to_string(),
        });
    }

    let txn = db.begin().await?;

    if get_user_by_email(&txn, &new_user.email).await?.is_some() {
        return Err(Error::DuplicateEmail {
            email: new_user.email,
        });
    }

    let created = user::ActiveModel {
        name: Set(new_user.name),
        email: Set(new_user.email),
        role: Set(new_user.role),
        created_at: Set(timestamp::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    credential::ActiveModel {
        user_id: Set(created.id),
        password: Set(new_user.password),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        "Registered user {} <{}> as {:?}",
        created.id,
        created.email,
        created.role
    );
    Ok(created)
}

/// Authenticates by email and password.
///
/// Unknown email and wrong password are deliberately indistinguishable.
///
/// # Errors
/// [`Error::InvalidCredentials`] unless both match the same account exactly.
pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> Result<user::Model> {
    let Some(found) = get_user_by_email(db, email).await? else {
        return Err(Error::InvalidCredentials);
    };

    let matches = Credential::find_by_id(found.id)
        .one(db)
        .await?
        .is_some_and(|c| c.password == password);

    if !matches {
        tracing::debug!("Rejected login for {}", email);
        return Err(Error::InvalidCredentials);
    }
    Ok(found)
}

/// Lists every user in id order.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Merges the supplied fields over an existing account.
///
/// Fields left as `None` keep their stored value. A new password replaces the
/// credential row, so the next login must use it. The primary admin may be renamed
/// or given a new email or password, but always stays an admin.
///
/// # Errors
/// - [`Error::ForbiddenOperation`] when demoting the primary admin
/// - [`Error::NotFound`] if the user does not exist
/// - [`Error::DuplicateEmail`] if the new email belongs to a different user
/// - [`Error::MissingFields`] if a supplied name, email or password is blank
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    changes: UserChanges,
) -> Result<user::Model> {
    let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
    if blank(&changes.name) || blank(&changes.email) || blank(&changes.password) {
        return Err(Error::MissingFields {
            message: "Nome, email e senha não podem ficar em branco".to_string(),
        });
    }
    if user_id == user::PRIMARY_ADMIN_ID && changes.role.is_some_and(|r| r != Role::Admin) {
        tracing::warn!("Refused to change the primary admin's role");
        return Err(Error::ForbiddenOperation {
            message: "Admin principal não pode deixar de ser admin".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = get_user_by_id(&txn, user_id)
        .await?
        .ok_or(Error::not_found(Entity::User, user_id))?;

    if let Some(email) = changes.email.as_deref()
        && email != existing.email
        && get_user_by_email(&txn, email).await?.is_some()
    {
        return Err(Error::DuplicateEmail {
            email: email.to_string(),
        });
    }

    let mut active: user::ActiveModel = existing.clone().into();
    if let Some(name) = changes.name {
        active.name = Set(name);
    }
    if let Some(email) = changes.email {
        active.email = Set(email);
    }
    if let Some(role) = changes.role {
        active.role = Set(role);
    }
    // Nothing to write when only the password (or nothing) changed
    let updated = if active.is_changed() {
        active.update(&txn).await?
    } else {
        existing
    };

    if let Some(password) = changes.password {
        credential::ActiveModel {
            user_id: Set(user_id),
            password: Set(password),
        }
        .update(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(updated)
}

/// Permanently removes an account and its credential.
///
/// References from leases, purchases and favorites are left in place.
///
/// # Errors
/// - [`Error::ForbiddenOperation`] for the primary admin
/// - [`Error::NotFound`] if the user does not exist
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    if user_id == user::PRIMARY_ADMIN_ID {
        tracing::warn!("Refused to delete the primary admin");
        return Err(Error::ForbiddenOperation {
            message: "Admin principal não pode ser deletado".to_string(),
        });
    }

    let txn = db.begin().await?;

    let result = User::delete_by_id(user_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found(Entity::User, user_id));
    }
    Credential::delete_by_id(user_id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!("Deleted user {}", user_id);
    Ok(())
}
