//! Public booking inquiry form.

use askama::Template;
use axum::{
  extract::{Query, State},
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::flash::{self, Flash};
use super::render;
use crate::db::{inquiries, rooms, try_lock};
use crate::domain::Room;
use crate::error::{AppError, ValidationErrors};
use crate::filters;
use crate::services::notifications;
use crate::state::AppState;
use crate::validation::{validate_booking, BookingForm, MAX_ADULTS, MAX_CHILDREN};

const SUBMITTED: &str = "Your booking inquiry has been submitted successfully! We will contact you soon.";
const SUBMIT_FAILED: &str = "An error occurred while submitting your booking. Please try again.";

#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingTemplate {
  pub rooms: Vec<Room>,
  pub form: BookingForm,
  pub errors: ValidationErrors,
  pub error: Option<String>,
  pub max_adults: i64,
  pub max_children: i64,
  pub flash: Option<Flash>,
}

impl BookingTemplate {
  fn new(rooms: Vec<Room>, form: BookingForm) -> Self {
    Self {
      rooms,
      form,
      errors: ValidationErrors::new(),
      error: None,
      max_adults: MAX_ADULTS,
      max_children: MAX_CHILDREN,
      flash: None,
    }
  }
}

#[derive(Deserialize)]
pub struct BookingQuery {
  /// Preselected room, e.g. from a "Book now" link on the rooms page
  pub room: Option<i64>,
}

/// GET /booking
pub async fn booking_page(
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<BookingQuery>,
) -> Result<Response, AppError> {
  let rooms = {
    let conn = try_lock(&state.db)?;
    rooms::list_available(&conn)?
  };
  let form = BookingForm {
    room_id: query.room.map(|id| id.to_string()).unwrap_or_default(),
    adults: "1".to_string(),
    children: "0".to_string(),
    ..Default::default()
  };
  let (jar, flash) = flash::take(jar);
  let template = BookingTemplate {
    flash,
    ..BookingTemplate::new(rooms, form)
  };
  Ok((jar, render(&template)?).into_response())
}

/// POST /booking
pub async fn booking_submit(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<BookingForm>,
) -> Result<Response, AppError> {
  let (booking, room_name) = {
    let conn = try_lock(&state.db)?;
    let rooms = rooms::list_available(&conn)?;

    let booking = match validate_booking(&form, &rooms) {
      Ok(booking) => booking,
      Err(errors) => {
        tracing::debug!(fields = errors.fields.len(), "Booking form rejected");
        let template = BookingTemplate {
          errors,
          ..BookingTemplate::new(rooms, form)
        };
        return Ok(render(&template)?.into_response());
      }
    };

    match inquiries::insert_booking(&conn, &booking) {
      Ok(id) => tracing::info!(booking_id = id, room_id = booking.room_id, "Booking inquiry received"),
      Err(e) => {
        tracing::error!("Failed to save booking inquiry: {}", e);
        let template = BookingTemplate {
          error: Some(SUBMIT_FAILED.to_string()),
          ..BookingTemplate::new(rooms, form)
        };
        return Ok(render(&template)?.into_response());
      }
    }

    let room_name = rooms
      .into_iter()
      .find(|r| r.id == booking.room_id)
      .map(|r| r.name)
      .unwrap_or_default();
    (booking, room_name)
  };

  // Connection released above; the row is stored whatever happens to the mail
  let email = notifications::booking_acknowledgment(&booking, &room_name);
  notifications::deliver(&*state.mailer, email, state.mail_timeout()).await;

  Ok(flash::redirect_with(jar, "/booking", Flash::success(SUBMITTED)))
}
