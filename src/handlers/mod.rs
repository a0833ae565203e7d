pub mod admin;
pub mod booking;
pub mod contact;
pub mod flash;

use askama::Template;
use axum::{
  extract::State,
  http::StatusCode,
  response::{Html, Response},
};

use crate::db::{amenities, rooms, try_lock};
use crate::domain::{group_by_category, Amenity, AmenityGroup, Room};
use crate::error::{error_page, AppError};
use crate::filters;
use crate::state::AppState;
use flash::Flash;

/// Rooms shown on the home page
const FEATURED_ROOMS: i64 = 3;
/// Amenities shown on the home page
const FEATURED_AMENITIES: i64 = 4;

/// Render a template, mapping failures to the 500 page
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
  Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub rooms: Vec<Room>,
  pub amenities: Vec<Amenity>,
  pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "rooms.html")]
pub struct RoomsTemplate {
  pub rooms: Vec<Room>,
  pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "amenities.html")]
pub struct AmenitiesTemplate {
  pub groups: Vec<AmenityGroup>,
  pub flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
  pub flash: Option<Flash>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  let template = {
    let conn = try_lock(&state.db)?;
    IndexTemplate {
      rooms: rooms::featured(&conn, FEATURED_ROOMS)?,
      amenities: amenities::featured(&conn, FEATURED_AMENITIES)?,
      flash: None,
    }
  };
  render(&template)
}

pub async fn room_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  let rooms = {
    let conn = try_lock(&state.db)?;
    rooms::list_available(&conn)?
  };
  render(&RoomsTemplate { rooms, flash: None })
}

pub async fn amenity_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  let amenities = {
    let conn = try_lock(&state.db)?;
    amenities::list_active(&conn)?
  };
  render(&AmenitiesTemplate {
    groups: group_by_category(amenities),
    flash: None,
  })
}

pub async fn gallery() -> Result<Html<String>, AppError> {
  render(&GalleryTemplate { flash: None })
}

/// Fallback for unknown paths
pub async fn not_found() -> Response {
  error_page(StatusCode::NOT_FOUND)
}

pub use booking::{booking_page, booking_submit};
pub use contact::{contact_page, contact_submit};
