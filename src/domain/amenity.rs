#[derive(Debug, Clone)]
pub struct Amenity {
  pub id: i64,
  pub name: String,
  pub description: String,
  /// spa, dining, fitness, ...
  pub category: String,
  pub image_url: Option<String>,
  pub is_active: bool,
  pub created_at: String,
}

/// Amenities sharing a category, for the grouped amenities page
#[derive(Debug, Clone)]
pub struct AmenityGroup {
  pub category: String,
  pub amenities: Vec<Amenity>,
}

/// Group amenities by category, keeping categories in first-seen order.
pub fn group_by_category(amenities: Vec<Amenity>) -> Vec<AmenityGroup> {
  let mut groups: Vec<AmenityGroup> = Vec::new();
  for amenity in amenities {
    match groups.iter_mut().find(|g| g.category == amenity.category) {
      Some(group) => group.amenities.push(amenity),
      None => groups.push(AmenityGroup {
        category: amenity.category.clone(),
        amenities: vec![amenity],
      }),
    }
  }
  groups
}
