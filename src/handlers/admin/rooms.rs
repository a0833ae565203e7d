//! Room catalog management.

use askama::Template;
use axum::{
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;

use super::{AdminChrome, PageQuery, ROOMS_PER_PAGE};
use crate::auth::RequireAdmin;
use crate::db::rooms::{self, RoomDelete};
use crate::db::{try_lock, Page};
use crate::domain::{Room, User};
use crate::error::{AppError, ValidationErrors};
use crate::filters;
use crate::handlers::flash::{self, Flash};
use crate::handlers::render;
use crate::state::AppState;
use crate::validation::{validate_room, RoomForm};

#[derive(Template)]
#[template(path = "admin/rooms.html")]
pub struct RoomsTemplate {
  pub chrome: AdminChrome,
  pub page: Page<Room>,
}

#[derive(Template)]
#[template(path = "admin/room_form.html")]
pub struct RoomFormTemplate {
  pub chrome: AdminChrome,
  /// None when adding a room
  pub room_id: Option<i64>,
  pub form: RoomForm,
  pub errors: ValidationErrors,
  pub error: Option<String>,
}

impl RoomFormTemplate {
  fn action(&self) -> String {
    match self.room_id {
      Some(id) => format!("/admin/rooms/{}/edit", id),
      None => "/admin/rooms/new".to_string(),
    }
  }
}

fn form_page(actor: User, room_id: Option<i64>, form: RoomForm, errors: ValidationErrors) -> Result<Response, AppError> {
  let template = RoomFormTemplate {
    chrome: AdminChrome::new(actor, None),
    room_id,
    form,
    errors,
    error: None,
  };
  Ok(render(&template)?.into_response())
}

/// GET /admin/rooms
pub async fn list(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
  let page = {
    let conn = try_lock(&state.db)?;
    rooms::list_page(&conn, query.number(), ROOMS_PER_PAGE)?
  };
  let (jar, chrome) = AdminChrome::take(actor, jar);
  Ok((jar, render(&RoomsTemplate { chrome, page })?).into_response())
}

/// GET /admin/rooms/new
pub async fn new_form(RequireAdmin(actor): RequireAdmin) -> Result<Response, AppError> {
  let form = RoomForm {
    is_available: Some("on".to_string()),
    ..Default::default()
  };
  form_page(actor, None, form, ValidationErrors::new())
}

/// POST /admin/rooms/new
pub async fn create(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<RoomForm>,
) -> Result<Response, AppError> {
  let draft = match validate_room(&form) {
    Ok(draft) => draft,
    Err(errors) => return form_page(actor, None, form, errors),
  };

  let id = {
    let conn = try_lock(&state.db)?;
    rooms::insert(&conn, &draft)?
  };
  tracing::info!(room_id = id, user_id = actor.id, "Room created");
  Ok(flash::redirect_with(
    jar,
    "/admin/rooms",
    Flash::success(format!("Room \"{}\" added successfully!", draft.name)),
  ))
}

/// GET /admin/rooms/{id}/edit
pub async fn edit_form(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Response, AppError> {
  let room = {
    let conn = try_lock(&state.db)?;
    rooms::get(&conn, id)?
  };
  let room = room.ok_or(AppError::NotFound)?;
  form_page(actor, Some(id), RoomForm::from_room(&room), ValidationErrors::new())
}

/// POST /admin/rooms/{id}/edit
pub async fn update(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
  Form(form): Form<RoomForm>,
) -> Result<Response, AppError> {
  let draft = match validate_room(&form) {
    Ok(draft) => draft,
    Err(errors) => return form_page(actor, Some(id), form, errors),
  };

  let updated = {
    let conn = try_lock(&state.db)?;
    rooms::update(&conn, id, &draft)?
  };
  if !updated {
    return Err(AppError::NotFound);
  }
  tracing::info!(room_id = id, user_id = actor.id, "Room updated");
  Ok(flash::redirect_with(
    jar,
    "/admin/rooms",
    Flash::success(format!("Room \"{}\" updated successfully!", draft.name)),
  ))
}

/// POST /admin/rooms/{id}/delete
pub async fn delete(
  RequireAdmin(actor): RequireAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
) -> Result<Response, AppError> {
  let outcome = {
    let conn = try_lock(&state.db)?;
    rooms::delete(&conn, id)?
  };
  let flash = match outcome {
    RoomDelete::Deleted => {
      tracing::info!(room_id = id, user_id = actor.id, "Room deleted");
      Flash::success("Room deleted successfully!")
    }
    RoomDelete::NotFound => return Err(AppError::NotFound),
    RoomDelete::HasInquiries(n) => Flash::error(format!(
      "This room has {} booking inquir{} and cannot be deleted. Mark it unavailable instead.",
      n,
      if n == 1 { "y" } else { "ies" }
    )),
  };
  Ok(flash::redirect_with(jar, "/admin/rooms", flash))
}
