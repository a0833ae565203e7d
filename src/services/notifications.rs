//! Guest acknowledgment emails for booking and contact inquiries.
//!
//! Delivery is best effort: the inquiry is already stored when these run,
//! so a failure or timeout is logged and never reaches the guest.

use askama::Template;
use std::time::Duration;

use super::mailer::{MailError, Mailer, OutgoingEmail};
use crate::domain::{NewBooking, NewContact};

pub const BOOKING_SUBJECT: &str = "Booking Inquiry Confirmation - The Oasis Hotel & Spa";
pub const CONTACT_SUBJECT: &str = "Contact Inquiry Received - The Oasis Hotel & Spa";

#[derive(Template)]
#[template(path = "email/booking_received.txt")]
struct BookingReceivedText<'a> {
    booking: &'a NewBooking,
    room_name: &'a str,
    special_requests: &'a str,
}

#[derive(Template)]
#[template(path = "email/contact_received.txt")]
struct ContactReceivedText<'a> {
    contact: &'a NewContact,
}

pub fn booking_acknowledgment(
    booking: &NewBooking,
    room_name: &str,
) -> Result<OutgoingEmail, askama::Error> {
    let body = BookingReceivedText {
        booking,
        room_name,
        special_requests: booking.special_requests.as_deref().unwrap_or("None"),
    }
    .render()?;
    Ok(OutgoingEmail {
        to: booking.email.clone(),
        subject: BOOKING_SUBJECT.to_string(),
        body,
    })
}

pub fn contact_acknowledgment(contact: &NewContact) -> Result<OutgoingEmail, askama::Error> {
    let body = ContactReceivedText { contact }.render()?;
    Ok(OutgoingEmail {
        to: contact.email.clone(),
        subject: CONTACT_SUBJECT.to_string(),
        body,
    })
}

/// Send within `timeout`. Returns whether the mail went out; never fails.
pub async fn deliver(
    mailer: &dyn Mailer,
    email: Result<OutgoingEmail, askama::Error>,
    timeout: Duration,
) -> bool {
    if !mailer.is_enabled() {
        tracing::debug!("Mail disabled, skipping acknowledgment");
        return false;
    }

    let email = match email {
        Ok(email) => email,
        Err(e) => {
            tracing::error!("Failed to render email: {}", MailError::from(e));
            return false;
        }
    };

    match tokio::time::timeout(timeout, mailer.send(&email)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!(subject = %email.subject, "Failed to send email: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!(
                subject = %email.subject,
                "Failed to send email: {}",
                MailError::Timeout(timeout)
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::SendFuture;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    impl Mailer for Recorder {
        fn send<'a>(&'a self, email: &'a OutgoingEmail) -> SendFuture<'a> {
            self.sent.lock().unwrap().push(email.clone());
            Box::pin(async { Ok(()) })
        }
    }

    struct Stalled;

    impl Mailer for Stalled {
        fn send<'a>(&'a self, _email: &'a OutgoingEmail) -> SendFuture<'a> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            })
        }
    }

    fn booking() -> NewBooking {
        NewBooking {
            guest_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: None,
            room_id: 1,
            check_in: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 12, 4).unwrap(),
            adults: 2,
            children: 1,
            special_requests: None,
        }
    }

    #[test]
    fn test_booking_body() {
        let email = booking_acknowledgment(&booking(), "Family Suite").unwrap();
        assert_eq!(email.to, "ada@example.com");
        assert_eq!(email.subject, BOOKING_SUBJECT);
        assert!(email.body.contains("Dear Ada Lovelace,"));
        assert!(email.body.contains("- Room: Family Suite"));
        assert!(email.body.contains("- Check-in: 2026-12-01"));
        assert!(email.body.contains("- Guests: 2 adults, 1 children"));
        assert!(email.body.contains("- Special Requests: None"));
    }

    #[test]
    fn test_contact_body() {
        let contact = NewContact {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            subject: "Parking".into(),
            message: "Is there parking?".into(),
        };
        let email = contact_acknowledgment(&contact).unwrap();
        assert!(email.body.contains("Subject: Parking"));
        assert!(email.body.contains("Message: Is there parking?"));
    }

    #[tokio::test]
    async fn test_deliver_records() {
        let mailer = Recorder::default();
        let email = booking_acknowledgment(&booking(), "Family Suite");
        assert!(deliver(&mailer, email, Duration::from_secs(1)).await);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_deliver_times_out() {
        let email = booking_acknowledgment(&booking(), "Family Suite");
        assert!(!deliver(&Stalled, email, Duration::from_millis(50)).await);
    }
}
