//! Shared harness for router-level tests: a migrated temp database, the real
//! router and a mailer that records or fails.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::TempDir;
use tower::ServiceExt;

use oasis_hotel::auth::db as auth_db;
use oasis_hotel::auth::password::hash_password;
use oasis_hotel::config::Config;
use oasis_hotel::db::{self, inquiries, rooms, DbPool};
use oasis_hotel::domain::{NewBooking, NewUser, Role, RoomDraft};
use oasis_hotel::routes;
use oasis_hotel::services::mailer::{MailError, Mailer, OutgoingEmail, SendFuture};
use oasis_hotel::state::AppState;

pub const PASSWORD: &str = "sea-breeze-42";

/// Records every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> SendFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        })
    }
}

/// Every send fails, as when the SMTP server rejects the login
pub struct FailingMailer;

impl Mailer for FailingMailer {
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> SendFuture<'a> {
        Box::pin(async move { Err(MailError::InvalidAddress(email.to.clone())) })
    }
}

pub struct TestApp {
    _temp: TempDir,
    pub pool: DbPool,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_mailer(Arc::new(RecordingMailer::default()))
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        let temp = TempDir::new().unwrap();
        let mut config = Config::from_sources(None, |_| None).unwrap();
        config.database_path = temp.path().join("oasis.db");
        let pool = db::init_db(&config.database_path).unwrap();
        let router = routes::router(AppState::new(pool.clone(), mailer, config));
        Self {
            _temp: temp,
            pool,
            router,
        }
    }

    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.pool.lock().unwrap()
    }

    pub fn user(&self, email: &str, role: Role) -> i64 {
        let conn = self.conn();
        auth_db::insert_user(
            &conn,
            &NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap().to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                role,
                created_by: None,
            },
        )
        .unwrap()
    }

    pub fn room(&self, name: &str, is_available: bool) -> i64 {
        let conn = self.conn();
        rooms::insert(
            &conn,
            &RoomDraft {
                name: name.to_string(),
                description: "Elegant room with ocean views".to_string(),
                price_cents: 29900,
                max_occupancy: 2,
                room_size: Some("450 sq ft".to_string()),
                bed_type: Some("King Bed".to_string()),
                amenities: "Ocean view, Private balcony".to_string(),
                image_url: None,
                is_available,
            },
        )
        .unwrap()
    }

    pub fn booking(&self, room_id: i64) -> i64 {
        let conn = self.conn();
        inquiries::insert_booking(
            &conn,
            &NewBooking {
                guest_name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                phone: None,
                room_id,
                check_in: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                check_out: NaiveDate::from_ymd_opt(2026, 12, 3).unwrap(),
                adults: 2,
                children: 0,
                special_requests: None,
            },
        )
        .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap()).await
    }

    /// Log in through the form and return the `Cookie` header value
    pub async fn login(&self, email: &str) -> String {
        let form = format!("email={}&password={}", urlencoding::encode(email), PASSWORD);
        let response = self.post_form("/admin/login", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login failed for {}", email);
        session_cookie(&response).expect("login sets a session cookie")
    }
}

/// `name=value` of the session cookie set by a response, if any
pub fn session_cookie(response: &Response) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with("oasis_session=") && !c.starts_with("oasis_session=;"))
        .map(|c| c.split(';').next().unwrap().to_string())
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

/// Decoded flash notice set by a redirect
pub fn flash_message(response: &Response) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with("oasis_flash=") && !c.starts_with("oasis_flash=;"))
        .map(|c| {
            let raw = c.split(';').next().unwrap().trim_start_matches("oasis_flash=").to_string();
            urlencoding::decode(&raw).unwrap().into_owned()
        })
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
