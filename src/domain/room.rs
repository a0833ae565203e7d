#[derive(Debug, Clone)]
pub struct Room {
  pub id: i64,
  pub name: String,
  pub description: String,
  /// Price per night in cents
  pub price_cents: i64,
  pub max_occupancy: i64,
  pub room_size: Option<String>,
  pub bed_type: Option<String>,
  /// Comma-separated amenity text as entered by staff
  pub amenities: String,
  pub image_url: Option<String>,
  pub is_available: bool,
  pub created_at: String,
}

impl Room {
  /// Price formatted with two decimals, e.g. `299.00`
  pub fn price_display(&self) -> String {
    format_cents(self.price_cents)
  }

  /// Amenity text split on commas, trimmed, empties dropped
  pub fn amenity_list(&self) -> Vec<String> {
    self
      .amenities
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_string)
      .collect()
  }
}

/// Validated room fields for insert or update
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
  pub name: String,
  pub description: String,
  pub price_cents: i64,
  pub max_occupancy: i64,
  pub room_size: Option<String>,
  pub bed_type: Option<String>,
  pub amenities: String,
  pub image_url: Option<String>,
  pub is_available: bool,
}

pub fn format_cents(cents: i64) -> String {
  format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn room(amenities: &str, price_cents: i64) -> Room {
    Room {
      id: 1,
      name: "Garden View Room".into(),
      description: "Quiet".into(),
      price_cents,
      max_occupancy: 2,
      room_size: None,
      bed_type: None,
      amenities: amenities.into(),
      image_url: None,
      is_available: true,
      created_at: String::new(),
    }
  }

  #[test]
  fn test_price_display() {
    assert_eq!(room("", 22900).price_display(), "229.00");
    assert_eq!(room("", 5).price_display(), "0.05");
    assert_eq!(room("", 129950).price_display(), "1299.50");
  }

  #[test]
  fn test_amenity_list_trims_and_skips_empty() {
    let list = room(" Garden view, Work desk,, Smart TV ,", 1).amenity_list();
    assert_eq!(list, vec!["Garden view", "Work desk", "Smart TV"]);
  }
}
