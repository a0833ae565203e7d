//! Back-office handlers. Every route here takes `RequireAdmin` or
//! `RequireSuperAdmin`, so the gate has already run when a body executes.

pub mod bookings;
pub mod dashboard;
pub mod messages;
pub mod rooms;
pub mod users;

use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::flash::{self, Flash};
use crate::auth::{authorize, Tier};
use crate::db::page_number;
use crate::domain::User;

// ============================================================================
// Query Limits
// ============================================================================

pub const USERS_PER_PAGE: i64 = 10;
pub const ROOMS_PER_PAGE: i64 = 10;
pub const BOOKINGS_PER_PAGE: i64 = 20;
pub const MESSAGES_PER_PAGE: i64 = 20;
/// Rows in each "recent" list on the dashboard
pub const RECENT_ITEMS: i64 = 5;

/// Shared by every back-office page: who is signed in, which nav links they
/// get, and any pending notice.
pub struct AdminChrome {
  pub actor: User,
  pub manage_users: bool,
  pub flash: Option<Flash>,
}

impl AdminChrome {
  pub fn new(actor: User, flash: Option<Flash>) -> Self {
    let manage_users = authorize(Some(&actor), Tier::SuperAdmin).is_ok();
    Self { actor, manage_users, flash }
  }

  /// Chrome with the pending flash consumed from `jar`
  pub fn take(actor: User, jar: CookieJar) -> (CookieJar, Self) {
    let (jar, flash) = flash::take(jar);
    (jar, Self::new(actor, flash))
  }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
  pub page: Option<i64>,
}

impl PageQuery {
  pub fn number(&self) -> i64 {
    page_number(self.page)
  }
}

/// Status change posted from a listing row
#[derive(Debug, Deserialize)]
pub struct StatusForm {
  #[serde(default)]
  pub status: String,
  /// Listing page to return to
  pub page: Option<i64>,
}

impl StatusForm {
  pub fn return_to(&self, base: &str) -> String {
    format!("{}?page={}", base, page_number(self.page))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Role;

  fn user(role: Role) -> User {
    let (is_admin, is_super_admin) = role.flags();
    User {
      id: 7,
      email: "staff@oasis.test".into(),
      name: "Front Desk".into(),
      password_hash: String::new(),
      is_admin,
      is_super_admin,
      created_by: None,
      created_at: String::new(),
      last_login_at: None,
    }
  }

  #[test]
  fn test_users_link_only_for_super_admins() {
    assert!(!AdminChrome::new(user(Role::Admin), None).manage_users);
    assert!(AdminChrome::new(user(Role::SuperAdmin), None).manage_users);
  }

  #[test]
  fn test_status_form_return_to() {
    let form = StatusForm { status: "read".into(), page: Some(3) };
    assert_eq!(form.return_to("/admin/messages"), "/admin/messages?page=3");
    let form = StatusForm { status: "read".into(), page: Some(-2) };
    assert_eq!(form.return_to("/admin/messages"), "/admin/messages?page=1");
  }
}
