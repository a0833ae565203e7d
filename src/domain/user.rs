use std::fmt;

/// Account role as stored in the two user flags.
///
/// The flag pair is only ever produced from a `Role`, so a super-admin
/// without the admin flag cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  /// Account without back-office access
  Staff,
  Admin,
  SuperAdmin,
}

impl Role {
  /// `(is_admin, is_super_admin)`
  pub fn flags(self) -> (bool, bool) {
    match self {
      Self::Staff => (false, false),
      Self::Admin => (true, false),
      Self::SuperAdmin => (true, true),
    }
  }

  /// Read the role back from stored flags. A super flag without the admin
  /// flag is treated as plain staff.
  pub fn from_flags(is_admin: bool, is_super_admin: bool) -> Self {
    match (is_admin, is_super_admin) {
      (true, true) => Self::SuperAdmin,
      (true, false) => Self::Admin,
      (false, _) => Self::Staff,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Staff => "Staff",
      Self::Admin => "Admin",
      Self::SuperAdmin => "Super Admin",
    }
  }
}

#[derive(Clone)]
pub struct User {
  pub id: i64,
  pub email: String,
  pub name: String,
  pub password_hash: String,
  pub is_admin: bool,
  pub is_super_admin: bool,
  /// Who provisioned this account (None for the bootstrap admin)
  pub created_by: Option<i64>,
  pub created_at: String,
  pub last_login_at: Option<String>,
}

impl User {
  pub fn role(&self) -> Role {
    Role::from_flags(self.is_admin, self.is_super_admin)
  }
}

impl fmt::Debug for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("email", &self.email)
      .field("name", &self.name)
      .field("is_admin", &self.is_admin)
      .field("is_super_admin", &self.is_super_admin)
      .field("created_by", &self.created_by)
      .finish_non_exhaustive()
  }
}

/// A user about to be inserted. The password is already hashed.
pub struct NewUser {
  pub email: String,
  pub name: String,
  pub password_hash: String,
  pub role: Role,
  pub created_by: Option<i64>,
}
