pub mod amenities;
pub mod inquiries;
pub mod rooms;
pub mod schema;
pub mod seed;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

/// Open a connection with the pragmas every connection needs
pub fn open(path: &Path) -> Result<Connection> {
  let conn = Connection::open(path)?;
  conn.execute_batch("PRAGMA foreign_keys = ON;")?;
  Ok(conn)
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    if let Err(e) = std::fs::create_dir_all(parent) {
      tracing::warn!("Could not create database directory {}: {}", parent.display(), e);
    }
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Current UTC time in a fixed-width RFC 3339 form, so text ordering matches time ordering
pub fn now() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Is this a UNIQUE/PRIMARY KEY/FOREIGN KEY constraint violation?
pub fn is_constraint_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _) if err.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ==================== Pagination ====================

/// One page of a newest-first listing
#[derive(Debug, Clone)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// 1-based page number
  pub page: i64,
  pub per_page: i64,
  pub total: i64,
}

impl<T> Page<T> {
  pub fn total_pages(&self) -> i64 {
    if self.total == 0 {
      1
    } else {
      (self.total + self.per_page - 1) / self.per_page
    }
  }

  pub fn has_prev(&self) -> bool {
    self.page > 1
  }

  pub fn has_next(&self) -> bool {
    self.page < self.total_pages()
  }

  pub fn prev_page(&self) -> i64 {
    (self.page - 1).max(1)
  }

  pub fn next_page(&self) -> i64 {
    self.page.saturating_add(1)
  }
}

/// Highest page number a listing will accept
pub const MAX_PAGE: i64 = 1_000_000;

/// Normalize a requested page number (missing or < 1 means page 1)
pub fn page_number(requested: Option<i64>) -> i64 {
  requested.unwrap_or(1).clamp(1, MAX_PAGE)
}

/// Row offset for a 1-based page
pub fn page_offset(page: i64, per_page: i64) -> i64 {
  (page.max(1) - 1).saturating_mul(per_page.max(0))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page(total: i64, page: i64, per_page: i64) -> Page<()> {
    Page {
      items: Vec::new(),
      page,
      per_page,
      total,
    }
  }

  #[test]
  fn test_total_pages() {
    assert_eq!(page(0, 1, 10).total_pages(), 1);
    assert_eq!(page(10, 1, 10).total_pages(), 1);
    assert_eq!(page(11, 1, 10).total_pages(), 2);
    assert_eq!(page(41, 1, 20).total_pages(), 3);
  }

  #[test]
  fn test_prev_next() {
    let first = page(25, 1, 10);
    assert!(!first.has_prev());
    assert!(first.has_next());

    let last = page(25, 3, 10);
    assert!(last.has_prev());
    assert!(!last.has_next());
    assert_eq!(last.prev_page(), 2);
  }

  #[test]
  fn test_page_number_and_offset() {
    assert_eq!(page_number(None), 1);
    assert_eq!(page_number(Some(0)), 1);
    assert_eq!(page_number(Some(-4)), 1);
    assert_eq!(page_number(Some(3)), 3);
    assert_eq!(page_offset(1, 10), 0);
    assert_eq!(page_offset(3, 20), 40);
  }

  #[test]
  fn test_huge_page_numbers_do_not_overflow() {
    assert_eq!(page_number(Some(i64::MAX)), MAX_PAGE);
    assert_eq!(page_offset(i64::MAX, 20), i64::MAX);
    assert_eq!(page(5, i64::MAX, 10).next_page(), i64::MAX);
  }

  #[test]
  fn test_now_is_fixed_width() {
    let a = now();
    assert!(a.ends_with('Z'));
    assert_eq!(a.len(), "2026-01-01T00:00:00.000000Z".len());
  }
}
