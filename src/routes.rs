//! The application router.

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers::{self, admin};
use crate::paths;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
  let admin_routes = Router::new()
    .route("/", get(admin::dashboard::dashboard))
    .route("/login", get(auth::login_page).post(auth::login_submit))
    .route("/logout", post(auth::logout))
    .route("/bookings", get(admin::bookings::list))
    .route("/bookings/{id}/status", post(admin::bookings::update_status))
    .route("/rooms", get(admin::rooms::list))
    .route("/rooms/new", get(admin::rooms::new_form).post(admin::rooms::create))
    .route("/rooms/{id}/edit", get(admin::rooms::edit_form).post(admin::rooms::update))
    .route("/rooms/{id}/delete", post(admin::rooms::delete))
    .route("/messages", get(admin::messages::list))
    .route("/messages/{id}/status", post(admin::messages::update_status))
    .route("/users", get(admin::users::list))
    .route("/users/new", get(admin::users::new_form).post(admin::users::create))
    .route("/users/{id}/delete", post(admin::users::delete));

  Router::new()
    .route("/", get(handlers::index))
    .route("/rooms", get(handlers::room_list))
    .route("/amenities", get(handlers::amenity_list))
    .route("/gallery", get(handlers::gallery))
    .route("/booking", get(handlers::booking_page).post(handlers::booking_submit))
    .route("/contact", get(handlers::contact_page).post(handlers::contact_submit))
    .nest("/admin", admin_routes)
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
