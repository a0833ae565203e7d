use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::{now, page_offset, Page};
use crate::domain::{Room, RoomDraft};

const ROOM_COLUMNS: &str = "id, name, description, price_cents, max_occupancy, room_size, bed_type,
  amenities, image_url, is_available, created_at";

fn row_to_room(row: &Row) -> Result<Room> {
  Ok(Room {
    id: row.get(0)?,
    name: row.get(1)?,
    description: row.get(2)?,
    price_cents: row.get(3)?,
    max_occupancy: row.get(4)?,
    room_size: row.get(5)?,
    bed_type: row.get(6)?,
    amenities: row.get(7)?,
    image_url: row.get(8)?,
    is_available: row.get(9)?,
    created_at: row.get(10)?,
  })
}

/// Outcome of a room delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomDelete {
  Deleted,
  NotFound,
  /// Booking inquiries still reference the room
  HasInquiries(i64),
}

/// All bookable rooms, in insertion order
pub fn list_available(conn: &Connection) -> Result<Vec<Room>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM rooms WHERE is_available = 1 ORDER BY id",
    ROOM_COLUMNS
  ))?;
  let rooms = stmt.query_map([], row_to_room)?.collect::<Result<Vec<_>>>()?;
  Ok(rooms)
}

/// First `limit` bookable rooms, for the home page
pub fn featured(conn: &Connection, limit: i64) -> Result<Vec<Room>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM rooms WHERE is_available = 1 ORDER BY id LIMIT ?1",
    ROOM_COLUMNS
  ))?;
  let rooms = stmt.query_map([limit], row_to_room)?.collect::<Result<Vec<_>>>()?;
  Ok(rooms)
}

/// Newest-first page of every room, available or not
pub fn list_page(conn: &Connection, page: i64, per_page: i64) -> Result<Page<Room>> {
  let total = count(conn)?;
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM rooms ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
    ROOM_COLUMNS
  ))?;
  let items = stmt
    .query_map(params![per_page, page_offset(page, per_page)], row_to_room)?
    .collect::<Result<Vec<_>>>()?;
  Ok(Page {
    items,
    page,
    per_page,
    total,
  })
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Room>> {
  conn
    .query_row(
      &format!("SELECT {} FROM rooms WHERE id = ?1", ROOM_COLUMNS),
      [id],
      row_to_room,
    )
    .optional()
}

pub fn count(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))
}

pub fn insert(conn: &Connection, draft: &RoomDraft) -> Result<i64> {
  conn.execute(
    "INSERT INTO rooms (name, description, price_cents, max_occupancy, room_size, bed_type,
       amenities, image_url, is_available, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      draft.name,
      draft.description,
      draft.price_cents,
      draft.max_occupancy,
      draft.room_size,
      draft.bed_type,
      draft.amenities,
      draft.image_url,
      draft.is_available,
      now(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

/// Overwrite every editable field. Returns false when the room does not exist.
pub fn update(conn: &Connection, id: i64, draft: &RoomDraft) -> Result<bool> {
  let changed = conn.execute(
    "UPDATE rooms SET name = ?1, description = ?2, price_cents = ?3, max_occupancy = ?4,
       room_size = ?5, bed_type = ?6, amenities = ?7, image_url = ?8, is_available = ?9
     WHERE id = ?10",
    params![
      draft.name,
      draft.description,
      draft.price_cents,
      draft.max_occupancy,
      draft.room_size,
      draft.bed_type,
      draft.amenities,
      draft.image_url,
      draft.is_available,
      id,
    ],
  )?;
  Ok(changed > 0)
}

/// Delete a room unless inquiries still point at it
pub fn delete(conn: &Connection, id: i64) -> Result<RoomDelete> {
  let tx = conn.unchecked_transaction()?;

  let exists: bool = tx.query_row(
    "SELECT EXISTS(SELECT 1 FROM rooms WHERE id = ?1)",
    [id],
    |row| row.get(0),
  )?;
  if !exists {
    return Ok(RoomDelete::NotFound);
  }

  let inquiries: i64 = tx.query_row(
    "SELECT COUNT(*) FROM booking_inquiries WHERE room_id = ?1",
    [id],
    |row| row.get(0),
  )?;
  if inquiries > 0 {
    return Ok(RoomDelete::HasInquiries(inquiries));
  }

  tx.execute("DELETE FROM rooms WHERE id = ?1", [id])?;
  tx.commit()?;
  Ok(RoomDelete::Deleted)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{sample_room, TestEnv};

  #[test]
  fn test_insert_and_get() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    let id = insert(&conn, &sample_room("Garden View Room")).unwrap();

    let room = get(&conn, id).unwrap().unwrap();
    assert_eq!(room.name, "Garden View Room");
    assert_eq!(room.price_cents, 22900);
    assert!(room.is_available);
    assert!(get(&conn, id + 100).unwrap().is_none());
  }

  #[test]
  fn test_available_excludes_hidden_rooms() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    insert(&conn, &sample_room("Open")).unwrap();
    let mut hidden = sample_room("Closed");
    hidden.is_available = false;
    insert(&conn, &hidden).unwrap();

    let names: Vec<String> = list_available(&conn).unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Open"]);
    assert_eq!(count(&conn).unwrap(), 2);
  }

  #[test]
  fn test_featured_respects_limit() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    for i in 0..5 {
      insert(&conn, &sample_room(&format!("Room {}", i))).unwrap();
    }
    assert_eq!(featured(&conn, 3).unwrap().len(), 3);
  }

  #[test]
  fn test_list_page_newest_first() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    for i in 0..12 {
      insert(&conn, &sample_room(&format!("Room {}", i))).unwrap();
    }

    let first = list_page(&conn, 1, 10).unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].name, "Room 11");

    let second = list_page(&conn, 2, 10).unwrap();
    assert_eq!(second.items.len(), 2);
    assert!(!second.has_next());
  }

  #[test]
  fn test_update_missing_room() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    assert!(!update(&conn, 42, &sample_room("Nope")).unwrap());

    let id = insert(&conn, &sample_room("Before")).unwrap();
    let mut draft = sample_room("After");
    draft.price_cents = 19999;
    assert!(update(&conn, id, &draft).unwrap());
    let room = get(&conn, id).unwrap().unwrap();
    assert_eq!(room.name, "After");
    assert_eq!(room.price_cents, 19999);
  }

  #[test]
  fn test_delete_refused_with_inquiries() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    let id = insert(&conn, &sample_room("Booked")).unwrap();
    crate::db::inquiries::insert_booking(&conn, &crate::testing::sample_booking(id)).unwrap();

    assert_eq!(delete(&conn, id).unwrap(), RoomDelete::HasInquiries(1));
    assert!(get(&conn, id).unwrap().is_some());
  }

  #[test]
  fn test_delete_free_room() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    let id = insert(&conn, &sample_room("Empty")).unwrap();
    assert_eq!(delete(&conn, id).unwrap(), RoomDelete::Deleted);
    assert_eq!(delete(&conn, id).unwrap(), RoomDelete::NotFound);
  }
}
