//! Authentication extractors.
//!
//! Each extractor resolves the session cookie to the acting user and runs
//! the authorization gate before the handler body executes, so a denied
//! request never reaches domain code.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{request::Parts, Method},
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::gate::{authorize, Tier};
use super::session;
use crate::db::try_lock;
use crate::domain::User;
use crate::error::{login_redirect, AppError, Denial};
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "oasis_session";

/// Session token from the request cookies, if any
pub fn session_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

fn resolve_actor(parts: &Parts, state: &AppState) -> Result<Option<User>, Response> {
    let token = session_token(parts);
    let conn = try_lock(&state.db).map_err(|e| AppError::from(e).into_response())?;
    session::current_actor(&conn, token.as_deref()).map_err(|e| AppError::from(e).into_response())
}

/// Run the gate for `required`, turning a denial into its redirect
fn guard(actor: Option<User>, required: Tier, parts: &Parts) -> Result<User, Response> {
    match (authorize(actor.as_ref(), required), actor) {
        (Ok(()), Some(user)) => Ok(user),
        (Ok(()), None) | (Err(Denial::LoginRequired), _) => {
            // Only a page can be returned to after login. Nested routers see
            // a stripped uri, so prefer the original.
            let uri = parts.extensions.get::<OriginalUri>().map_or(&parts.uri, |o| &o.0);
            let next = if parts.method == Method::GET {
                uri.path_and_query().map_or("/admin", |p| p.as_str())
            } else {
                "/admin"
            };
            Err(login_redirect(next))
        }
        (Err(denial), Some(user)) => {
            tracing::info!(user_id = user.id, path = %parts.uri.path(), "Access denied: {}", denial);
            Err(denial.into_response())
        }
        (Err(denial), None) => Err(denial.into_response()),
    }
}

/// The acting user, or None for anonymous requests. Never rejects except on
/// a database failure.
#[derive(Debug, Clone)]
pub struct Actor(pub Option<User>);

impl FromRequestParts<AppState> for Actor {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_actor(parts, state).map(Actor)
    }
}

/// Requires the `Admin` tier.
/// Anonymous requests are sent to the login page.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = resolve_actor(parts, state)?;
        guard(actor, Tier::Admin, parts).map(RequireAdmin)
    }
}

/// Requires the `SuperAdmin` tier.
/// Admins without it are sent back to the dashboard with a notice.
#[derive(Debug, Clone)]
pub struct RequireSuperAdmin(pub User);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = resolve_actor(parts, state)?;
        guard(actor, Tier::SuperAdmin, parts).map(RequireSuperAdmin)
    }
}
