//! Public pages and the booking and contact forms, driven through the router.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use common::{body_text, flash_message, location, FailingMailer, RecordingMailer, TestApp};
use oasis_hotel::db::inquiries;
use oasis_hotel::domain::{BookingStatus, ContactStatus};
use oasis_hotel::services::mailer::DisabledMailer;
use oasis_hotel::services::notifications::{BOOKING_SUBJECT, CONTACT_SUBJECT};

fn booking_form(room_id: i64, check_in: &str, check_out: &str) -> String {
    format!(
        "guest_name=Ada+Lovelace&email=ada%40example.com&phone=&room_id={}&check_in={}&check_out={}&adults=2&children=1&special_requests=Late+arrival",
        room_id, check_in, check_out
    )
}

#[tokio::test]
async fn test_home_lists_available_rooms() {
    let app = TestApp::new();
    app.room("Deluxe Ocean View", true);
    app.room("Closed Wing", false);

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Deluxe Ocean View"));
    assert!(!body.contains("Closed Wing"));
}

#[tokio::test]
async fn test_public_pages_render() {
    let app = TestApp::new();
    for path in ["/rooms", "/amenities", "/gallery", "/booking", "/contact"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", path);
    }
}

#[tokio::test]
async fn test_unknown_path_is_404_page() {
    let app = TestApp::new();
    let response = app.get("/no-such-page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));
}

#[tokio::test]
async fn test_booking_is_stored_pending_and_acknowledged() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = TestApp::with_mailer(mailer.clone());
    let room_id = app.room("Family Suite", true);

    let response = app
        .post_form("/booking", &booking_form(room_id, "2026-12-01", "2026-12-04"), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/booking");
    assert!(flash_message(&response).unwrap().contains("submitted successfully"));

    {
        let conn = app.conn();
        assert_eq!(inquiries::count_bookings(&conn).unwrap(), 1);
        assert_eq!(
            inquiries::count_bookings_with_status(&conn, BookingStatus::Pending).unwrap(),
            1
        );
        let booking = &inquiries::recent_bookings(&conn, 1).unwrap()[0];
        assert_eq!(booking.children, 1);
        assert_eq!(booking.special_requests.as_deref(), Some("Late arrival"));
    }

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, BOOKING_SUBJECT);
    assert!(sent[0].body.contains("Family Suite"));
}

#[tokio::test]
async fn test_booking_check_out_must_follow_check_in() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = TestApp::with_mailer(mailer.clone());
    let room_id = app.room("Family Suite", true);

    for (check_in, check_out) in [("2026-12-04", "2026-12-01"), ("2026-12-04", "2026-12-04")] {
        let response = app
            .post_form("/booking", &booking_form(room_id, check_in, check_out), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Check-out date must be after check-in date."));
    }

    assert_eq!(inquiries::count_bookings(&app.conn()).unwrap(), 0);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_booking_rejects_unavailable_room() {
    let app = TestApp::new();
    let room_id = app.room("Closed Wing", false);

    let response = app
        .post_form("/booking", &booking_form(room_id, "2026-12-01", "2026-12-04"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("That room is not available for booking."));
    assert_eq!(inquiries::count_bookings(&app.conn()).unwrap(), 0);
}

#[tokio::test]
async fn test_mail_failure_still_stores_booking() {
    let app = TestApp::with_mailer(Arc::new(FailingMailer));
    let room_id = app.room("Garden View Room", true);

    let response = app
        .post_form("/booking", &booking_form(room_id, "2026-12-01", "2026-12-02"), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(flash_message(&response).unwrap().contains("submitted successfully"));
    assert_eq!(inquiries::count_bookings(&app.conn()).unwrap(), 1);
}

#[tokio::test]
async fn test_booking_without_mail_configured() {
    let app = TestApp::with_mailer(Arc::new(DisabledMailer));
    let room_id = app.room("Garden View Room", true);

    let response = app
        .post_form("/booking", &booking_form(room_id, "2026-12-01", "2026-12-02"), None)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(inquiries::count_bookings(&app.conn()).unwrap(), 1);
}

#[tokio::test]
async fn test_contact_is_stored_as_new() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = TestApp::with_mailer(mailer.clone());

    let response = app
        .post_form(
            "/contact",
            "name=Ada&email=ada%40example.com&subject=Spa+hours&message=When+does+the+spa+open%3F",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/contact");
    assert!(flash_message(&response).unwrap().contains("sent successfully"));

    let conn = app.conn();
    assert_eq!(inquiries::count_contacts(&conn).unwrap(), 1);
    assert_eq!(inquiries::count_contacts_with_status(&conn, ContactStatus::New).unwrap(), 1);
    drop(conn);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, CONTACT_SUBJECT);
}

#[tokio::test]
async fn test_contact_rejects_bad_email() {
    let app = TestApp::new();
    let response = app
        .post_form("/contact", "name=Ada&email=ada%40example&subject=Hi&message=Hello", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Enter a valid email address."));
    assert_eq!(inquiries::count_contacts(&app.conn()).unwrap(), 0);
}
