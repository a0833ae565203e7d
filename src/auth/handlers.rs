//! Back-office login and logout handlers.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use super::gate::{authorize, Tier};
use super::middleware::{Actor, SESSION_COOKIE_NAME};
use super::session::{self, NewSession};
use crate::db::try_lock;
use crate::error::AuthFailure;
use crate::filters;
use crate::handlers::flash::{self, Flash};
use crate::state::AppState;
use crate::validation::safe_next;

/// Shown for unknown emails, wrong passwords and non-admin accounts alike
const LOGIN_FAILED: &str = "Invalid email or password.";

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
    pub next: String,
    pub remember: bool,
    pub flash: Option<Flash>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox: present when ticked
    pub remember: Option<String>,
    pub next: Option<String>,
}

fn render_login(template: LoginTemplate) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => crate::error::AppError::from(e).into_response(),
    }
}

fn session_cookie(session: &NewSession, secure: bool, remember_days: i64) -> Cookie<'static> {
    let builder = Cookie::build((SESSION_COOKIE_NAME, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    // Without Max-Age the cookie ends with the browser session
    if session.persistent {
        builder.max_age(time::Duration::days(remember_days)).build()
    } else {
        builder.build()
    }
}

/// GET /admin/login - Show login page
pub async fn login_page(
    Actor(actor): Actor,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    if authorize(actor.as_ref(), Tier::Admin).is_ok() {
        return Redirect::to("/admin").into_response();
    }
    let (jar, flash) = flash::take(jar);
    let template = LoginTemplate {
        error: None,
        email: String::new(),
        next: safe_next(query.next.as_deref()).to_string(),
        remember: false,
        flash,
    };
    (jar, render_login(template)).into_response()
}

/// POST /admin/login - Process login
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_string();
    let remember = form.remember.is_some();
    let next = safe_next(form.next.as_deref()).to_string();
    let retry = |error: &str| {
        render_login(LoginTemplate {
            error: Some(error.to_string()),
            email: email.clone(),
            next: next.clone(),
            remember,
            flash: None,
        })
    };

    // Validate input
    if email.is_empty() || form.password.is_empty() {
        return retry("Email and password are required.");
    }

    let result = match try_lock(&state.db) {
        Ok(conn) => session::login(&conn, &email, &form.password, remember, &state.config.session),
        Err(e) => {
            tracing::error!("Login unavailable: {}", e);
            return retry("An error occurred. Please try again.");
        }
    };

    match result {
        Ok(session) => {
            let cookie = session_cookie(
                &session,
                state.config.session.secure_cookies,
                state.config.session.remember_days,
            );
            (jar.add(cookie), Redirect::to(&next)).into_response()
        }
        Err(AuthFailure::InvalidCredentials | AuthFailure::InsufficientPrivilege) => {
            retry(LOGIN_FAILED)
        }
        Err(AuthFailure::Store(e)) => {
            tracing::error!("Login failed on database error: {}", e);
            retry("An error occurred. Please try again.")
        }
    }
}

/// POST /admin/logout - End the session
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string()) {
        match try_lock(&state.db) {
            Ok(conn) => {
                if let Err(e) = session::logout(&conn, &token) {
                    tracing::warn!("Failed to delete session: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to delete session: {}", e),
        }
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE_NAME, "")).path("/"));
    flash::redirect_with(jar, "/admin/login", Flash::success("You have been logged out."))
}
