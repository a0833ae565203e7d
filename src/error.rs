//! Error types shared by the store, the auth layer and the handlers.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use thiserror::Error;

use crate::auth::gate::Tier;
use crate::db::DbLockError;
use crate::filters;
use crate::handlers::flash::{self, Flash};

/// Why a login attempt did not produce a session.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// Unknown email or wrong password. The two are never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Correct password, but the account has no back-office access.
    #[error("account is not an admin")]
    InsufficientPrivilege,

    #[error("credential store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// A request the authorization gate refused. Nothing was read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("login required")]
    LoginRequired,

    #[error("{required} access required")]
    Forbidden { required: Tier },

    #[error("cannot delete own account")]
    CannotDeleteSelf,

    #[error("cannot delete a super admin")]
    CannotDeleteSuperAdmin,
}

impl Denial {
    /// Notice shown to the user after the redirect
    pub fn notice(&self) -> String {
        match self {
            Self::LoginRequired => "Please log in to access the admin area.".to_string(),
            Self::Forbidden { required } => {
                format!("Access denied. {} privileges required.", required)
            }
            Self::CannotDeleteSelf => "You cannot delete your own account.".to_string(),
            Self::CannotDeleteSuperAdmin => "Super admin accounts cannot be deleted.".to_string(),
        }
    }

    pub fn redirect_target(&self) -> &'static str {
        match self {
            Self::LoginRequired => "/admin/login",
            Self::Forbidden { .. } => "/admin",
            Self::CannotDeleteSelf | Self::CannotDeleteSuperAdmin => "/admin/users",
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        let kind = match self {
            Self::LoginRequired => Flash::info(self.notice()),
            _ => Flash::error(self.notice()),
        };
        flash::redirect_with(CookieJar::new(), self.redirect_target(), kind)
    }
}

/// Credential store failures callers need to tell apart.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Per-field validation messages, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Failures of the super-admin user management operations.
#[derive(Debug, Error)]
pub enum UserAdminError {
    #[error(transparent)]
    Denied(#[from] Denial),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("email already registered")]
    EmailConflict,

    #[error("user not found")]
    NotFound,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl From<StoreError> for UserAdminError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => Self::EmailConflict,
            StoreError::NotFound => Self::NotFound,
            StoreError::Database(e) => Self::Database(e),
        }
    }
}

/// Request-level error for handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Denied: {0}")]
    Denied(#[from] Denial),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database unavailable")]
    Unavailable(#[from] DbLockError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(m) => Self::Conflict(m),
            StoreError::NotFound => Self::NotFound,
            StoreError::Database(e) => Self::Database(e),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: &'static str,
    pub message: &'static str,
    pub flash: Option<Flash>,
}

/// Full error page for a status, falling back to plain text if rendering fails
pub fn error_page(status: StatusCode) -> Response {
    let (title, message) = if status == StatusCode::NOT_FOUND {
        ("Page Not Found", "The page you are looking for does not exist.")
    } else {
        (
            "Something Went Wrong",
            "An unexpected error occurred. Please try again later.",
        )
    };
    let template = ErrorTemplate {
        status: status.as_u16(),
        title,
        message,
        flash: None,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            (status, message).into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => error_page(StatusCode::NOT_FOUND),
            Self::Denied(denial) => denial.into_response(),
            Self::Validation(_) | Self::Conflict(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::Database(_) | Self::Unavailable(_) | Self::Template(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                error_page(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Where the login form sends a denied visitor back to
pub fn login_redirect(path: &str) -> Response {
    let target = format!("/admin/login?next={}", urlencoding::encode(path));
    let jar = CookieJar::new().add(flash::cookie(&Flash::info(Denial::LoginRequired.notice())));
    (jar, Redirect::to(&target)).into_response()
}
