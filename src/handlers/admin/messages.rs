//! Contact inquiries ("messages") in the back-office.

use askama::Template;
use axum::{
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;

use super::{AdminChrome, PageQuery, StatusForm, MESSAGES_PER_PAGE};
use crate::auth::RequireAdmin;
use crate::db::{inquiries, try_lock, Page};
use crate::domain::{ContactInquiry, ContactStatus};
use crate::error::AppError;
use crate::filters;
use crate::handlers::flash::{self, Flash};
use crate::handlers::render;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "admin/messages.html")]
pub struct MessagesTemplate {
  pub chrome: AdminChrome,
  pub page: Page<ContactInquiry>,
  pub statuses: [ContactStatus; 3],
}

/// GET /admin/messages
pub async fn list(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
  let page = {
    let conn = try_lock(&state.db)?;
    inquiries::list_contacts(&conn, query.number(), MESSAGES_PER_PAGE)?
  };
  let (jar, chrome) = AdminChrome::take(actor, jar);
  let template = MessagesTemplate {
    chrome,
    page,
    statuses: ContactStatus::ALL,
  };
  Ok((jar, render(&template)?).into_response())
}

/// POST /admin/messages/{id}/status
pub async fn update_status(
  RequireAdmin(_actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
  Form(form): Form<StatusForm>,
) -> Result<Response, AppError> {
  let back = form.return_to("/admin/messages");
  let Some(status) = ContactStatus::from_str(&form.status) else {
    return Ok(flash::redirect_with(jar, &back, Flash::error("Invalid message status.")));
  };

  let updated = {
    let conn = try_lock(&state.db)?;
    inquiries::update_contact_status(&conn, id, status)?
  };
  if !updated {
    return Err(AppError::NotFound);
  }

  Ok(flash::redirect_with(
    jar,
    &back,
    Flash::success(format!("Message marked as {}.", status.label())),
  ))
}
