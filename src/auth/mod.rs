//! Authentication and authorization for the back-office.

pub mod db;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod session;

pub use gate::{authorize, Tier};
pub use handlers::{login_page, login_submit, logout};
pub use middleware::{Actor, RequireAdmin, RequireSuperAdmin, SESSION_COOKIE_NAME};
