use askama::Template;
use axum::{
  extract::State,
  response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::{AdminChrome, RECENT_ITEMS};
use crate::auth::db as auth_db;
use crate::auth::RequireAdmin;
use crate::db::{inquiries, rooms, try_lock};
use crate::domain::{BookingInquiry, BookingStatus, ContactInquiry, ContactStatus};
use crate::error::AppError;
use crate::filters;
use crate::handlers::render;
use crate::state::AppState;

pub struct DashboardStats {
  pub rooms: i64,
  pub bookings: i64,
  pub pending_bookings: i64,
  pub messages: i64,
  pub new_messages: i64,
  pub users: i64,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
  pub chrome: AdminChrome,
  pub stats: DashboardStats,
  pub recent_bookings: Vec<BookingInquiry>,
  pub recent_messages: Vec<ContactInquiry>,
}

/// GET /admin
pub async fn dashboard(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
) -> Result<Response, AppError> {
  let (stats, recent_bookings, recent_messages) = {
    let conn = try_lock(&state.db)?;
    let stats = DashboardStats {
      rooms: rooms::count(&conn)?,
      bookings: inquiries::count_bookings(&conn)?,
      pending_bookings: inquiries::count_bookings_with_status(&conn, BookingStatus::Pending)?,
      messages: inquiries::count_contacts(&conn)?,
      new_messages: inquiries::count_contacts_with_status(&conn, ContactStatus::New)?,
      users: auth_db::count_users(&conn)?,
    };
    (
      stats,
      inquiries::recent_bookings(&conn, RECENT_ITEMS)?,
      inquiries::recent_contacts(&conn, RECENT_ITEMS)?,
    )
  };

  let (jar, chrome) = AdminChrome::take(actor, jar);
  let template = DashboardTemplate {
    chrome,
    stats,
    recent_bookings,
    recent_messages,
  };
  Ok((jar, render(&template)?).into_response())
}
