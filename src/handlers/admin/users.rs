//! User management. Super admins only.

use askama::Template;
use axum::{
  extract::{Path, Query, State},
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;

use super::{AdminChrome, PageQuery, USERS_PER_PAGE};
use crate::auth::db as auth_db;
use crate::auth::gate;
use crate::auth::RequireSuperAdmin;
use crate::db::{try_lock, Page};
use crate::domain::User;
use crate::error::{AppError, UserAdminError, ValidationErrors};
use crate::filters;
use crate::handlers::flash::{self, Flash};
use crate::handlers::render;
use crate::state::AppState;
use crate::validation::{UserForm, MIN_PASSWORD_LEN};

pub struct UserRow {
  pub user: User,
  /// The acting super admin may delete this account
  pub deletable: bool,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct UsersTemplate {
  pub chrome: AdminChrome,
  pub page: Page<UserRow>,
}

#[derive(Template)]
#[template(path = "admin/user_form.html")]
pub struct UserFormTemplate {
  pub chrome: AdminChrome,
  pub form: UserForm,
  pub errors: ValidationErrors,
  pub error: Option<String>,
  pub min_password_len: usize,
}

fn form_page(actor: User, mut form: UserForm, errors: ValidationErrors, error: Option<String>) -> Result<Response, AppError> {
  // Never echo passwords back
  form.password.clear();
  form.confirm_password.clear();
  let template = UserFormTemplate {
    chrome: AdminChrome::new(actor, None),
    form,
    errors,
    error,
    min_password_len: MIN_PASSWORD_LEN,
  };
  Ok(render(&template)?.into_response())
}

/// GET /admin/users
pub async fn list(
  RequireSuperAdmin(actor): RequireSuperAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
  let page = {
    let conn = try_lock(&state.db)?;
    auth_db::list_users(&conn, query.number(), USERS_PER_PAGE)?
  };
  let page = Page {
    items: page
      .items
      .into_iter()
      .map(|user| UserRow {
        deletable: gate::check_delete(&actor, user.id, Some(&user)).is_ok(),
        user,
      })
      .collect(),
    page: page.page,
    per_page: page.per_page,
    total: page.total,
  };
  let (jar, chrome) = AdminChrome::take(actor, jar);
  Ok((jar, render(&UsersTemplate { chrome, page })?).into_response())
}

/// GET /admin/users/new
pub async fn new_form(RequireSuperAdmin(actor): RequireSuperAdmin) -> Result<Response, AppError> {
  let form = UserForm {
    is_admin: Some("on".to_string()),
    ..Default::default()
  };
  form_page(actor, form, ValidationErrors::new(), None)
}

/// POST /admin/users/new
pub async fn create(
  RequireSuperAdmin(actor): RequireSuperAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<UserForm>,
) -> Result<Response, AppError> {
  let result = {
    let conn = try_lock(&state.db)?;
    gate::create_user(&conn, &actor, &form)
  };

  match result {
    Ok(_) => Ok(flash::redirect_with(
      jar,
      "/admin/users",
      Flash::success(format!("User {} created successfully!", form.email.trim())),
    )),
    Err(UserAdminError::Invalid(errors)) => form_page(actor, form, errors, None),
    Err(UserAdminError::EmailConflict) => {
      let mut errors = ValidationErrors::new();
      errors.add("email", "Email already registered.");
      form_page(actor, form, errors, None)
    }
    Err(UserAdminError::Denied(denial)) => Ok(denial.into_response()),
    Err(e) => {
      tracing::error!("Failed to create user: {}", e);
      form_page(
        actor,
        form,
        ValidationErrors::new(),
        Some("An error occurred while creating the user. Please try again.".to_string()),
      )
    }
  }
}

/// POST /admin/users/{id}/delete
pub async fn delete(
  RequireSuperAdmin(actor): RequireSuperAdmin,
  State(state): State<AppState>,
  jar: CookieJar,
  Path(id): Path<i64>,
) -> Result<Response, AppError> {
  let result = {
    let conn = try_lock(&state.db)?;
    gate::delete_user(&conn, &actor, id)
  };

  match result {
    Ok(()) => Ok(flash::redirect_with(jar, "/admin/users", Flash::success("User deleted successfully!"))),
    Err(UserAdminError::Denied(denial)) => Ok(denial.into_response()),
    Err(UserAdminError::NotFound) => Err(AppError::NotFound),
    Err(UserAdminError::Database(e)) => Err(e.into()),
    Err(e) => Err(AppError::Internal(e.to_string())),
  }
}
