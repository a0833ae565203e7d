//! Authorization gate.
//!
//! Every protected operation names the tier it needs and asks `authorize`.
//! Handlers never inspect the role flags themselves.

use rusqlite::Connection;
use std::fmt;

use super::db as auth_db;
use super::password;
use crate::domain::{NewUser, Role, User};
use crate::error::{Denial, UserAdminError};
use crate::validation::{self, UserForm};

/// Access tiers, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Anonymous,
    Admin,
    SuperAdmin,
}

impl Tier {
    /// Tier held by a (possibly absent) actor
    pub fn of(actor: Option<&User>) -> Self {
        match actor.map(User::role) {
            Some(Role::SuperAdmin) => Self::SuperAdmin,
            Some(Role::Admin) => Self::Admin,
            Some(Role::Staff) | None => Self::Anonymous,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Anonymous => "Anonymous",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super admin",
        };
        f.write_str(label)
    }
}

/// Allow the request when the actor holds at least `required`
pub fn authorize(actor: Option<&User>, required: Tier) -> Result<(), Denial> {
    if Tier::of(actor) >= required {
        return Ok(());
    }
    match actor {
        None => Err(Denial::LoginRequired),
        Some(_) => Err(Denial::Forbidden { required }),
    }
}

/// Rules for deleting `target`. Self-deletion is refused before the target
/// is even looked at.
pub fn check_delete(actor: &User, target_id: i64, target: Option<&User>) -> Result<(), UserAdminError> {
    authorize(Some(actor), Tier::SuperAdmin)?;
    if target_id == actor.id {
        return Err(Denial::CannotDeleteSelf.into());
    }
    let target = target.ok_or(UserAdminError::NotFound)?;
    if target.is_super_admin {
        return Err(Denial::CannotDeleteSuperAdmin.into());
    }
    Ok(())
}

/// Create an account on behalf of a super admin. Returns the new user's id.
///
/// The email check happens before the password is hashed so a duplicate
/// costs nothing and writes nothing.
pub fn create_user(conn: &Connection, actor: &User, form: &UserForm) -> Result<i64, UserAdminError> {
    authorize(Some(actor), Tier::SuperAdmin)?;
    let valid = validation::validate_user(form)?;

    if auth_db::email_exists(conn, &valid.email)? {
        tracing::info!(actor_id = actor.id, "User creation refused: email already registered");
        return Err(UserAdminError::EmailConflict);
    }

    let password_hash =
        password::hash_password(&valid.password).map_err(|e| UserAdminError::Hash(e.to_string()))?;
    let role = if valid.is_admin { Role::Admin } else { Role::Staff };

    let id = auth_db::insert_user(
        conn,
        &NewUser {
            email: valid.email,
            name: valid.name,
            password_hash,
            role,
            created_by: Some(actor.id),
        },
    )?;
    tracing::info!(actor_id = actor.id, user_id = id, role = role.label(), "User created");
    Ok(id)
}

/// Delete an account on behalf of a super admin
pub fn delete_user(conn: &Connection, actor: &User, target_id: i64) -> Result<(), UserAdminError> {
    authorize(Some(actor), Tier::SuperAdmin)?;
    if target_id == actor.id {
        return Err(Denial::CannotDeleteSelf.into());
    }
    let target = auth_db::find_by_id(conn, target_id)?;
    check_delete(actor, target_id, target.as_ref())?;
    auth_db::delete_user(conn, target_id)?;
    tracing::info!(actor_id = actor.id, user_id = target_id, "User deleted");
    Ok(())
}
