//! Session authenticator: turns credentials into a session token and a
//! session token back into the acting user.
//!
//! The token is the only thing the browser holds. Every request resolves it
//! against the store again, so deleting a user or a session takes effect on
//! the next request.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use super::db as auth_db;
use super::gate::{authorize, Tier};
use super::password;
use crate::config::SessionConfig;
use crate::db::LogOnError;
use crate::domain::User;
use crate::error::AuthFailure;

/// A session created by a successful login
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    /// "Remember me": the cookie outlives the browser session
    pub persistent: bool,
}

/// 256-bit random session token, hex encoded
pub fn generate_token() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

/// Server-side lifetime for a new session
pub fn session_lifetime(config: &SessionConfig, remember: bool) -> Duration {
    if remember {
        Duration::days(config.remember_days)
    } else {
        Duration::hours(config.default_hours)
    }
}

/// Check credentials and open a session.
///
/// Unknown emails and wrong passwords fail the same way and cost the same
/// Argon2 work. Only admins may hold a session.
pub fn login(
    conn: &Connection,
    email: &str,
    password: &str,
    remember: bool,
    config: &SessionConfig,
) -> Result<NewSession, AuthFailure> {
    let Some(user) = auth_db::find_by_email(conn, email)? else {
        password::verify_dummy(password);
        tracing::info!("Login failed: unknown account");
        return Err(AuthFailure::InvalidCredentials);
    };

    if !password::verify_password(password, &user.password_hash) {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(AuthFailure::InvalidCredentials);
    }

    if authorize(Some(&user), Tier::Admin).is_err() {
        tracing::info!(user_id = user.id, "Login refused: account has no admin access");
        return Err(AuthFailure::InsufficientPrivilege);
    }

    auth_db::cleanup_expired_sessions(conn).log_warn("Failed to purge expired sessions");

    let token = generate_token();
    let expires_at = auth_db::create_session(
        conn,
        user.id,
        &token,
        session_lifetime(config, remember),
        remember,
    )?;

    // Update last login time (log but don't fail on error)
    if let Err(e) = auth_db::update_last_login(conn, user.id) {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    tracing::info!(user_id = user.id, persistent = remember, "Admin logged in");
    Ok(NewSession {
        token,
        user_id: user.id,
        expires_at,
        persistent: remember,
    })
}

/// The user behind a session token, or None for anonymous requests
pub fn current_actor(conn: &Connection, token: Option<&str>) -> rusqlite::Result<Option<User>> {
    match token {
        Some(token) if !token.is_empty() => auth_db::get_session_user(conn, token),
        _ => Ok(None),
    }
}

/// End a session. Unknown tokens are ignored.
pub fn logout(conn: &Connection, token: &str) -> rusqlite::Result<()> {
    auth_db::delete_session(conn, token)
}
