//! Startup data: the sample catalog and the bootstrap super admin.

use rusqlite::Connection;
use thiserror::Error;

use super::{amenities, rooms};
use crate::auth::db as auth_db;
use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::domain::{NewUser, Role, RoomDraft};
use crate::error::StoreError;

#[derive(Debug, Error)]
pub enum SeedError {
  #[error("no super admin exists and ADMIN_EMAIL / ADMIN_PASSWORD are not set")]
  MissingAdmin,

  #[error("bootstrap admin password must be at least {0} characters")]
  WeakPassword(usize),

  #[error("password hashing failed: {0}")]
  Hash(String),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// (name, description, price_cents, max_occupancy, room_size, bed_type, amenities)
const SAMPLE_ROOMS: &[(&str, &str, i64, i64, &str, &str, &str)] = &[
  (
    "Deluxe Ocean View",
    "Elegant room featuring stunning ocean views, premium furnishings, and modern amenities. Perfect for couples seeking a romantic getaway with breathtaking sunset views from the private balcony.",
    29900,
    2,
    "450 sq ft",
    "King Bed",
    "Ocean view, Private balcony, Mini-bar, Smart TV, Premium bedding, Coffee maker, Safe",
  ),
  (
    "Family Suite",
    "Spacious two-bedroom suite ideal for families, featuring separate living area, kitchenette, and kid-friendly amenities. Enjoy quality family time with comfort and convenience.",
    44900,
    6,
    "750 sq ft",
    "1 King + 2 Twin Beds",
    "Kitchenette, Living area, Two bathrooms, Kids amenities, Sofa bed, Dining table",
  ),
  (
    "Presidential Suite",
    "The epitome of luxury featuring panoramic views, marble bathrooms, separate dining area, and exclusive concierge service. Experience unparalleled comfort and sophistication.",
    89900,
    4,
    "1200 sq ft",
    "King Bed + Sofa Bed",
    "Panoramic views, Marble bathroom, Dining area, Premium bar, Butler service, Private terrace",
  ),
  (
    "Garden View Room",
    "Tranquil room overlooking our beautifully landscaped gardens, offering a peaceful retreat with modern comforts and easy access to hotel amenities.",
    22900,
    2,
    "400 sq ft",
    "Queen Bed",
    "Garden view, Work desk, Mini-fridge, Smart TV, Premium Wi-Fi, Rain shower",
  ),
  (
    "Spa Wellness Suite",
    "Rejuvenating suite designed for wellness enthusiasts, featuring in-room spa amenities, meditation area, and direct access to our world-class spa facilities.",
    64900,
    2,
    "600 sq ft",
    "King Bed",
    "Spa access, Meditation area, Aromatherapy, Yoga mat, Healthy mini-bar, Deep soaking tub",
  ),
];

/// (name, description, category)
const SAMPLE_AMENITIES: &[(&str, &str, &str)] = &[
  ("Serenity Spa", "Award-winning spa offering therapeutic massages, rejuvenating facials, and holistic wellness treatments in a tranquil setting.", "spa"),
  ("Infinity Pool", "Stunning infinity pool overlooking the ocean with poolside service, comfortable loungers, and cabana rentals available.", "pool"),
  ("Azure Restaurant", "Fine dining restaurant featuring contemporary cuisine, fresh seafood, and an extensive wine collection with ocean views.", "dining"),
  ("Fitness Center", "State-of-the-art fitness facility with modern equipment, personal training services, and group fitness classes.", "fitness"),
  ("Beach Club", "Private beach access with water sports equipment, beach volleyball, and beachside refreshments.", "recreation"),
  ("Poolside Grill", "Casual dining venue offering grilled specialties, tropical cocktails, and light bites in a relaxed poolside atmosphere.", "dining"),
  ("Yoga Pavilion", "Open-air pavilion hosting daily yoga sessions, meditation classes, and wellness workshops with ocean views.", "wellness"),
  ("Business Center", "Fully equipped business center with meeting rooms, conference facilities, and high-speed internet for corporate guests.", "business"),
  ("Kids Club", "Supervised activities and entertainment for children, featuring games, crafts, and educational programs.", "family"),
  ("Tennis Court", "Professional tennis court with equipment rental and lessons available from certified instructors.", "recreation"),
];

/// Seed rooms and amenities into empty tables. Tables that already hold
/// rows are left alone.
pub fn seed_catalog(conn: &Connection) -> Result<(usize, usize), SeedError> {
  let tx = conn.unchecked_transaction()?;
  let mut seeded_rooms = 0;
  let mut seeded_amenities = 0;

  if rooms::count(&tx)? == 0 {
    for (name, description, price_cents, max_occupancy, room_size, bed_type, amenity_text) in SAMPLE_ROOMS {
      rooms::insert(
        &tx,
        &RoomDraft {
          name: name.to_string(),
          description: description.to_string(),
          price_cents: *price_cents,
          max_occupancy: *max_occupancy,
          room_size: Some(room_size.to_string()),
          bed_type: Some(bed_type.to_string()),
          amenities: amenity_text.to_string(),
          image_url: None,
          is_available: true,
        },
      )?;
      seeded_rooms += 1;
    }
  }

  if amenities::count(&tx)? == 0 {
    for (name, description, category) in SAMPLE_AMENITIES {
      amenities::insert(&tx, name, description, category)?;
      seeded_amenities += 1;
    }
  }

  tx.commit()?;
  if seeded_rooms + seeded_amenities > 0 {
    tracing::info!("Seeded {} rooms and {} amenities", seeded_rooms, seeded_amenities);
  }
  Ok((seeded_rooms, seeded_amenities))
}

/// Make sure at least one super admin exists.
///
/// Returns the id of the account created, or None when one already existed.
pub fn ensure_super_admin(
  conn: &Connection,
  bootstrap: Option<&AdminBootstrap>,
) -> Result<Option<i64>, SeedError> {
  if auth_db::count_super_admins(conn)? > 0 {
    return Ok(None);
  }

  let bootstrap = bootstrap.ok_or(SeedError::MissingAdmin)?;
  if bootstrap.password.chars().count() < crate::validation::MIN_PASSWORD_LEN {
    return Err(SeedError::WeakPassword(crate::validation::MIN_PASSWORD_LEN));
  }

  let password_hash = hash_password(&bootstrap.password).map_err(|e| SeedError::Hash(e.to_string()))?;
  let id = auth_db::insert_user(
    conn,
    &NewUser {
      email: bootstrap.email.clone(),
      name: bootstrap.name.clone(),
      password_hash,
      role: Role::SuperAdmin,
      created_by: None,
    },
  )?;
  tracing::info!(user_id = id, "Created bootstrap super admin");
  Ok(Some(id))
}
