use rusqlite::{params, Connection, Result, Row};

use super::now;
use crate::domain::Amenity;

fn row_to_amenity(row: &Row) -> Result<Amenity> {
  Ok(Amenity {
    id: row.get(0)?,
    name: row.get(1)?,
    description: row.get(2)?,
    category: row.get(3)?,
    image_url: row.get(4)?,
    is_active: row.get(5)?,
    created_at: row.get(6)?,
  })
}

/// Active amenities ordered by category then name
pub fn list_active(conn: &Connection) -> Result<Vec<Amenity>> {
  let mut stmt = conn.prepare(
    "SELECT id, name, description, category, image_url, is_active, created_at
     FROM amenities WHERE is_active = 1 ORDER BY category, name",
  )?;
  let amenities = stmt.query_map([], row_to_amenity)?.collect::<Result<Vec<_>>>()?;
  Ok(amenities)
}

/// First `limit` active amenities, for the home page
pub fn featured(conn: &Connection, limit: i64) -> Result<Vec<Amenity>> {
  let mut stmt = conn.prepare(
    "SELECT id, name, description, category, image_url, is_active, created_at
     FROM amenities WHERE is_active = 1 ORDER BY id LIMIT ?1",
  )?;
  let amenities = stmt.query_map([limit], row_to_amenity)?.collect::<Result<Vec<_>>>()?;
  Ok(amenities)
}

pub fn count(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM amenities", [], |row| row.get(0))
}

pub fn insert(conn: &Connection, name: &str, description: &str, category: &str) -> Result<i64> {
  conn.execute(
    "INSERT INTO amenities (name, description, category, created_at) VALUES (?1, ?2, ?3, ?4)",
    params![name, description, category, now()],
  )?;
  Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_list_active_sorted_by_category() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    insert(&conn, "Serenity Spa", "Massages", "spa").unwrap();
    insert(&conn, "Poolside Grill", "Grill", "dining").unwrap();
    insert(&conn, "Azure Restaurant", "Fine dining", "dining").unwrap();
    conn
      .execute("UPDATE amenities SET is_active = 0 WHERE name = 'Serenity Spa'", [])
      .unwrap();

    let names: Vec<String> = list_active(&conn).unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Azure Restaurant", "Poolside Grill"]);
  }

  #[test]
  fn test_featured_limit() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    for i in 0..6 {
      insert(&conn, &format!("Amenity {}", i), "d", "recreation").unwrap();
    }
    let featured = featured(&conn, 4).unwrap();
    assert_eq!(featured.len(), 4);
    assert_eq!(featured[0].name, "Amenity 0");
    assert_eq!(count(&conn).unwrap(), 6);
  }
}
