//! Booking and contact inquiries submitted from the public site.

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::{now, page_offset, Page};
use crate::domain::{
  BookingInquiry, BookingStatus, ContactInquiry, ContactStatus, NewBooking, NewContact,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_column(row: &Row, idx: usize) -> Result<NaiveDate> {
  let raw: String = row.get(idx)?;
  NaiveDate::parse_from_str(&raw, DATE_FORMAT)
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

const BOOKING_SELECT: &str = "SELECT b.id, b.guest_name, b.email, b.phone, b.room_id, r.name,
  b.check_in, b.check_out, b.adults, b.children, b.special_requests, b.status, b.created_at
  FROM booking_inquiries b JOIN rooms r ON r.id = b.room_id";

fn row_to_booking(row: &Row) -> Result<BookingInquiry> {
  Ok(BookingInquiry {
    id: row.get(0)?,
    guest_name: row.get(1)?,
    email: row.get(2)?,
    phone: row.get(3)?,
    room_id: row.get(4)?,
    room_name: row.get(5)?,
    check_in: date_column(row, 6)?,
    check_out: date_column(row, 7)?,
    adults: row.get(8)?,
    children: row.get(9)?,
    special_requests: row.get(10)?,
    status: row.get(11)?,
    created_at: row.get(12)?,
  })
}

fn row_to_contact(row: &Row) -> Result<ContactInquiry> {
  Ok(ContactInquiry {
    id: row.get(0)?,
    name: row.get(1)?,
    email: row.get(2)?,
    subject: row.get(3)?,
    message: row.get(4)?,
    status: row.get(5)?,
    created_at: row.get(6)?,
  })
}

// ==================== Bookings ====================

/// Store a validated booking with status `pending`
pub fn insert_booking(conn: &Connection, booking: &NewBooking) -> Result<i64> {
  conn.execute(
    "INSERT INTO booking_inquiries (guest_name, email, phone, room_id, check_in, check_out,
       adults, children, special_requests, status, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    params![
      booking.guest_name,
      booking.email,
      booking.phone,
      booking.room_id,
      booking.check_in.format(DATE_FORMAT).to_string(),
      booking.check_out.format(DATE_FORMAT).to_string(),
      booking.adults,
      booking.children,
      booking.special_requests,
      BookingStatus::Pending.as_str(),
      now(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn list_bookings(conn: &Connection, page: i64, per_page: i64) -> Result<Page<BookingInquiry>> {
  let total = count_bookings(conn)?;
  let mut stmt = conn.prepare(&format!(
    "{} ORDER BY b.created_at DESC, b.id DESC LIMIT ?1 OFFSET ?2",
    BOOKING_SELECT
  ))?;
  let items = stmt
    .query_map(params![per_page, page_offset(page, per_page)], row_to_booking)?
    .collect::<Result<Vec<_>>>()?;
  Ok(Page {
    items,
    page,
    per_page,
    total,
  })
}

pub fn recent_bookings(conn: &Connection, limit: i64) -> Result<Vec<BookingInquiry>> {
  let mut stmt = conn.prepare(&format!(
    "{} ORDER BY b.created_at DESC, b.id DESC LIMIT ?1",
    BOOKING_SELECT
  ))?;
  let items = stmt.query_map([limit], row_to_booking)?.collect::<Result<Vec<_>>>()?;
  Ok(items)
}

pub fn get_booking(conn: &Connection, id: i64) -> Result<Option<BookingInquiry>> {
  conn
    .query_row(&format!("{} WHERE b.id = ?1", BOOKING_SELECT), [id], row_to_booking)
    .optional()
}

/// Returns false when no booking has this id
pub fn update_booking_status(conn: &Connection, id: i64, status: BookingStatus) -> Result<bool> {
  let changed = conn.execute(
    "UPDATE booking_inquiries SET status = ?1 WHERE id = ?2",
    params![status.as_str(), id],
  )?;
  Ok(changed > 0)
}

pub fn count_bookings(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM booking_inquiries", [], |row| row.get(0))
}

pub fn count_bookings_with_status(conn: &Connection, status: BookingStatus) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM booking_inquiries WHERE status = ?1",
    [status.as_str()],
    |row| row.get(0),
  )
}

// ==================== Contact messages ====================

/// Store a validated contact message with status `new`
pub fn insert_contact(conn: &Connection, contact: &NewContact) -> Result<i64> {
  conn.execute(
    "INSERT INTO contact_inquiries (name, email, subject, message, status, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      contact.name,
      contact.email,
      contact.subject,
      contact.message,
      ContactStatus::New.as_str(),
      now(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn list_contacts(conn: &Connection, page: i64, per_page: i64) -> Result<Page<ContactInquiry>> {
  let total = count_contacts(conn)?;
  let mut stmt = conn.prepare(
    "SELECT id, name, email, subject, message, status, created_at
     FROM contact_inquiries ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
  )?;
  let items = stmt
    .query_map(params![per_page, page_offset(page, per_page)], row_to_contact)?
    .collect::<Result<Vec<_>>>()?;
  Ok(Page {
    items,
    page,
    per_page,
    total,
  })
}

pub fn recent_contacts(conn: &Connection, limit: i64) -> Result<Vec<ContactInquiry>> {
  let mut stmt = conn.prepare(
    "SELECT id, name, email, subject, message, status, created_at
     FROM contact_inquiries ORDER BY created_at DESC, id DESC LIMIT ?1",
  )?;
  let items = stmt.query_map([limit], row_to_contact)?.collect::<Result<Vec<_>>>()?;
  Ok(items)
}

/// Returns false when no message has this id
pub fn update_contact_status(conn: &Connection, id: i64, status: ContactStatus) -> Result<bool> {
  let changed = conn.execute(
    "UPDATE contact_inquiries SET status = ?1 WHERE id = ?2",
    params![status.as_str(), id],
  )?;
  Ok(changed > 0)
}

pub fn count_contacts(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM contact_inquiries", [], |row| row.get(0))
}

pub fn count_contacts_with_status(conn: &Connection, status: ContactStatus) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM contact_inquiries WHERE status = ?1",
    [status.as_str()],
    |row| row.get(0),
  )
}
