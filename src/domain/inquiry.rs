use chrono::NaiveDate;

/// Follow-up state of a booking inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
  Pending,
  Confirmed,
  Cancelled,
}

impl BookingStatus {
  pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(Self::Pending),
      "confirmed" => Some(Self::Confirmed),
      "cancelled" => Some(Self::Cancelled),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Confirmed => "confirmed",
      Self::Cancelled => "cancelled",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Pending => "Pending",
      Self::Confirmed => "Confirmed",
      Self::Cancelled => "Cancelled",
    }
  }
}

/// Follow-up state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
  New,
  Read,
  Replied,
}

impl ContactStatus {
  pub const ALL: [Self; 3] = [Self::New, Self::Read, Self::Replied];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "new" => Some(Self::New),
      "read" => Some(Self::Read),
      "replied" => Some(Self::Replied),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Read => "read",
      Self::Replied => "replied",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Read => "Read",
      Self::Replied => "Replied",
    }
  }
}

#[derive(Debug, Clone)]
pub struct BookingInquiry {
  pub id: i64,
  pub guest_name: String,
  pub email: String,
  pub phone: Option<String>,
  pub room_id: i64,
  /// Joined from rooms for display
  pub room_name: String,
  pub check_in: NaiveDate,
  pub check_out: NaiveDate,
  pub adults: i64,
  pub children: i64,
  pub special_requests: Option<String>,
  /// Raw stored value; rows written before status validation may hold anything
  pub status: String,
  pub created_at: String,
}

impl BookingInquiry {
  pub fn nights(&self) -> i64 {
    (self.check_out - self.check_in).num_days()
  }

  pub fn status_label(&self) -> &str {
    BookingStatus::from_str(&self.status)
      .map(|s| s.label())
      .unwrap_or(self.status.as_str())
  }
}

#[derive(Debug, Clone)]
pub struct ContactInquiry {
  pub id: i64,
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
  pub status: String,
  pub created_at: String,
}

impl ContactInquiry {
  pub fn status_label(&self) -> &str {
    ContactStatus::from_str(&self.status)
      .map(|s| s.label())
      .unwrap_or(self.status.as_str())
  }
}

/// Validated booking submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
  pub guest_name: String,
  pub email: String,
  pub phone: Option<String>,
  pub room_id: i64,
  pub check_in: NaiveDate,
  pub check_out: NaiveDate,
  pub adults: i64,
  pub children: i64,
  pub special_requests: Option<String>,
}

/// Validated contact submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_booking_status_roundtrip() {
    for status in BookingStatus::ALL {
      assert_eq!(BookingStatus::from_str(status.as_str()), Some(status));
    }
    assert_eq!(BookingStatus::from_str("Pending"), None);
    assert_eq!(BookingStatus::from_str("archived"), None);
  }

  #[test]
  fn test_contact_status_roundtrip() {
    for status in ContactStatus::ALL {
      assert_eq!(ContactStatus::from_str(status.as_str()), Some(status));
    }
    assert_eq!(ContactStatus::from_str(""), None);
  }

  #[test]
  fn test_nights_and_unknown_status_label() {
    let booking = BookingInquiry {
      id: 1,
      guest_name: "Ada".into(),
      email: "ada@example.com".into(),
      phone: None,
      room_id: 1,
      room_name: "Family Suite".into(),
      check_in: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
      check_out: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
      adults: 2,
      children: 1,
      special_requests: None,
      status: "waitlisted".into(),
      created_at: String::new(),
    };
    assert_eq!(booking.nights(), 3);
    assert_eq!(booking.status_label(), "waitlisted");
  }
}
