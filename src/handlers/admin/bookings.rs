//! Booking inquiry listing and status changes.

use askama::Template;
use axum::{
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;

use super::{AdminChrome, PageQuery, StatusForm, BOOKINGS_PER_PAGE};
use crate::auth::RequireAdmin;
use crate::db::{inquiries, try_lock, Page};
use crate::domain::{BookingInquiry, BookingStatus};
use crate::error::AppError;
use crate::filters;
use crate::handlers::flash::{self, Flash};
use crate::handlers::render;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "admin/bookings.html")]
pub struct BookingsTemplate {
  pub chrome: AdminChrome,
  pub page: Page<BookingInquiry>,
  pub statuses: [BookingStatus; 3],
}

/// GET /admin/bookings
pub async fn list(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
  let page = {
    let conn = try_lock(&state.db)?;
    inquiries::list_bookings(&conn, query.number(), BOOKINGS_PER_PAGE)?
  };
  let (jar, chrome) = AdminChrome::take(actor, jar);
  let template = BookingsTemplate {
    chrome,
    page,
    statuses: BookingStatus::ALL,
  };
  Ok((jar, render(&template)?).into_response())
}

/// POST /admin/bookings/{id}/status
pub async fn update_status(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
  Form(form): Form<StatusForm>,
) -> Result<Response, AppError> {
  let back = form.return_to("/admin/bookings");
  let Some(status) = BookingStatus::from_str(&form.status) else {
    tracing::info!(booking_id = id, status = %form.status, "Rejected unknown booking status");
    return Ok(flash::redirect_with(jar, &back, Flash::error("Invalid booking status.")));
  };

  let updated = {
    let conn = try_lock(&state.db)?;
    inquiries::update_booking_status(&conn, id, status)?
  };
  if !updated {
    return Err(AppError::NotFound);
  }

  tracing::info!(booking_id = id, user_id = actor.id, status = status.as_str(), "Booking status changed");
  let notice = format!("Booking status updated to {}.", status.label());
  Ok(flash::redirect_with(jar, &back, Flash::success(notice)))
}
