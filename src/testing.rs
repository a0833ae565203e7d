//! Test utilities for database setup.
//!
//! Builds databases through the real migrations so tests never carry their
//! own copy of the schema.

use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::Path;
use std::sync::MutexGuard;
use tempfile::TempDir;

use crate::auth::password::hash_password;
use crate::db::{self, DbPool};
use crate::domain::{NewBooking, NewContact, NewUser, Role, RoomDraft, User};

/// Migrated site database in a temporary directory, removed on drop.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let pool = db::init_db(&temp.path().join("oasis.db"))?;
        Ok(Self { temp, pool })
    }

    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.pool.lock().unwrap()
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Insert a user with the given role and password, returning the stored record
    pub fn user(&self, email: &str, password: &str, role: Role) -> User {
        let conn = self.conn();
        let id = crate::auth::db::insert_user(
            &conn,
            &NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap_or(email).to_string(),
                password_hash: hash_password(password).unwrap(),
                role,
                created_by: None,
            },
        )
        .unwrap();
        crate::auth::db::find_by_id(&conn, id).unwrap().unwrap()
    }
}

pub fn sample_room(name: &str) -> RoomDraft {
    RoomDraft {
        name: name.to_string(),
        description: "Tranquil room overlooking the gardens".to_string(),
        price_cents: 22900,
        max_occupancy: 2,
        room_size: Some("400 sq ft".to_string()),
        bed_type: Some("Queen Bed".to_string()),
        amenities: "Garden view, Work desk, Smart TV".to_string(),
        image_url: None,
        is_available: true,
    }
}

pub fn sample_booking(room_id: i64) -> NewBooking {
    NewBooking {
        guest_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        room_id,
        check_in: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 12, 4).unwrap(),
        adults: 2,
        children: 0,
        special_requests: None,
    }
}

pub fn sample_contact() -> NewContact {
    NewContact {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        subject: "Late check-in".to_string(),
        message: "We arrive after midnight.".to_string(),
    }
}
