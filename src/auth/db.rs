//! Credential store: user accounts and server-side sessions.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use crate::db::{is_constraint_violation, now, page_offset, Page};
use crate::domain::{NewUser, User};
use crate::error::StoreError;

const USER_COLUMNS: &str = "id, email, name, password_hash, is_admin, is_super_admin, created_by,
    created_at, last_login_at";

fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        is_admin: row.get(4)?,
        is_super_admin: row.get(5)?,
        created_by: row.get(6)?,
        created_at: row.get(7)?,
        last_login_at: row.get(8)?,
    })
}

// ==================== Users ====================

/// Exact (case-sensitive) email lookup
pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE email = ?1", USER_COLUMNS),
        [email],
        row_to_user,
    )
    .optional()
}

pub fn find_by_id(conn: &Connection, user_id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
        [user_id],
        row_to_user,
    )
    .optional()
}

/// Check if an email is already registered
pub fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
        [email],
        |row| row.get(0),
    )
}

/// Create a user, returns the user ID
pub fn insert_user(conn: &Connection, user: &NewUser) -> std::result::Result<i64, StoreError> {
    let (is_admin, is_super_admin) = user.role.flags();
    let inserted = conn.execute(
        "INSERT INTO users (email, password_hash, name, is_admin, is_super_admin, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.email,
            user.password_hash,
            user.name,
            is_admin,
            is_super_admin,
            user.created_by,
            now()
        ],
    );
    match inserted {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_constraint_violation(&e) => {
            Err(StoreError::Conflict(format!("email {} already registered", user.email)))
        }
        Err(e) => Err(StoreError::Database(e)),
    }
}

/// Delete a user. Their sessions go with them (ON DELETE CASCADE).
pub fn delete_user(conn: &Connection, user_id: i64) -> std::result::Result<(), StoreError> {
    let deleted = conn.execute("DELETE FROM users WHERE id = ?1", [user_id])?;
    if deleted == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Newest-first page of users
pub fn list_users(conn: &Connection, page: i64, per_page: i64) -> Result<Page<User>> {
    let total = count_users(conn)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM users ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        USER_COLUMNS
    ))?;
    let items = stmt
        .query_map(params![per_page, page_offset(page, per_page)], row_to_user)?
        .collect::<Result<Vec<_>>>()?;
    Ok(Page {
        items,
        page,
        per_page,
        total,
    })
}

pub fn count_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

pub fn count_super_admins(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM users WHERE is_super_admin = 1",
        [],
        |row| row.get(0),
    )
}

/// Update user's last login timestamp
pub fn update_last_login(conn: &Connection, user_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE users SET last_login_at = ?1 WHERE id = ?2",
        params![now(), user_id],
    )?;
    Ok(())
}

// ==================== Sessions ====================

/// Create a new session expiring after `lifetime`
pub fn create_session(
    conn: &Connection,
    user_id: i64,
    session_id: &str,
    lifetime: Duration,
    persistent: bool,
) -> Result<DateTime<Utc>> {
    let now = Utc::now();
    let expires = now + lifetime;
    conn.execute(
        "INSERT INTO sessions (id, user_id, created_at, expires_at, last_access_at, persistent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            session_id,
            user_id,
            stamp(now),
            stamp(expires),
            stamp(now),
            persistent
        ],
    )?;
    Ok(expires)
}

/// Resolve a live session to its user. Expired or unknown sessions yield None.
pub fn get_session_user(conn: &Connection, session_id: &str) -> Result<Option<User>> {
    let at = now();
    let user = conn
        .query_row(
            r#"
            SELECT u.id, u.email, u.name, u.password_hash, u.is_admin, u.is_super_admin,
                   u.created_by, u.created_at, u.last_login_at
            FROM sessions s
            JOIN users u ON s.user_id = u.id
            WHERE s.id = ?1 AND s.expires_at > ?2
            "#,
            params![session_id, at],
            row_to_user,
        )
        .optional()?;

    if user.is_some() {
        // Update last access time
        if let Err(e) = conn.execute(
            "UPDATE sessions SET last_access_at = ?1 WHERE id = ?2",
            params![at, session_id],
        ) {
            tracing::warn!("Failed to touch session: {}", e);
        }
    }
    Ok(user)
}

/// Delete a session (logout)
pub fn delete_session(conn: &Connection, session_id: &str) -> Result<()> {
    conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id])?;
    Ok(())
}

/// Cleanup expired sessions, returns count of deleted sessions
pub fn cleanup_expired_sessions(conn: &Connection) -> Result<usize> {
    let count = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![now()],
    )?;
    Ok(count)
}

/// Same fixed-width form as `db::now`, so expiry comparisons are text comparisons
fn stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
