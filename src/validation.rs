//! Form parsing and validation for the public inquiry forms and the
//! back-office room and user forms.
//!
//! Every validator checks all fields and reports each failure against its
//! field name, so the form can be re-rendered with messages inline.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{NewBooking, NewContact, Room, RoomDraft};
use crate::error::ValidationErrors;

pub const MIN_ADULTS: i64 = 1;
pub const MAX_ADULTS: i64 = 8;
pub const MAX_CHILDREN: i64 = 6;
pub const MAX_OCCUPANCY: i64 = 20;
pub const MIN_PASSWORD_LEN: usize = 8;

// ============================================================================
// Forms
// ============================================================================

/// Fields arrive as text so a malformed number is a field error, not a
/// rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingForm {
  pub guest_name: String,
  pub email: String,
  pub phone: String,
  pub room_id: String,
  pub check_in: String,
  pub check_out: String,
  pub adults: String,
  pub children: String,
  pub special_requests: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
  pub name: String,
  pub email: String,
  pub subject: String,
  pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoomForm {
  pub name: String,
  pub description: String,
  pub price: String,
  pub max_occupancy: String,
  pub room_size: String,
  pub bed_type: String,
  pub amenities: String,
  pub image_url: String,
  /// Checkbox: present ("on") when ticked
  pub is_available: Option<String>,
}

impl RoomForm {
  /// Prefill for editing an existing room
  pub fn from_room(room: &Room) -> Self {
    Self {
      name: room.name.clone(),
      description: room.description.clone(),
      price: room.price_display(),
      max_occupancy: room.max_occupancy.to_string(),
      room_size: room.room_size.clone().unwrap_or_default(),
      bed_type: room.bed_type.clone().unwrap_or_default(),
      amenities: room.amenities.clone(),
      image_url: room.image_url.clone().unwrap_or_default(),
      is_available: room.is_available.then(|| "on".to_string()),
    }
  }

  pub fn available(&self) -> bool {
    self.is_available.is_some()
  }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
  pub name: String,
  pub email: String,
  pub password: String,
  pub confirm_password: String,
  /// Checkbox: present when the new account gets back-office access
  pub is_admin: Option<String>,
}

impl std::fmt::Debug for UserForm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("UserForm")
      .field("name", &self.name)
      .field("email", &self.email)
      .field("is_admin", &self.is_admin)
      .finish_non_exhaustive()
  }
}

/// Validated user fields, password still in plaintext for hashing
pub struct ValidUser {
  pub name: String,
  pub email: String,
  pub password: String,
  pub is_admin: bool,
}

// ============================================================================
// Field checks
// ============================================================================

/// Shape check: one `@`, a non-empty local part, a dotted domain with no
/// empty labels, and no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  let mut parts = email.split('@');
  let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
    return false;
  };
  !local.is_empty() && domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Login redirect target: only local absolute paths are honored
pub fn safe_next(next: Option<&str>) -> &str {
  match next {
    Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
    _ => "/admin",
  }
}

/// Parse a decimal price with at most two fractional digits into cents
pub fn parse_price_cents(input: &str) -> Option<i64> {
  let input = input.trim();
  let (whole, frac) = match input.split_once('.') {
    Some((whole, frac)) => (whole, frac),
    None => (input, ""),
  };
  if whole.is_empty() || frac.len() > 2 {
    return None;
  }
  if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  let whole: i64 = whole.parse().ok()?;
  let frac: i64 = match frac.len() {
    0 => 0,
    1 => frac.parse::<i64>().ok()? * 10,
    _ => frac.parse().ok()?,
  };
  whole.checked_mul(100)?.checked_add(frac)
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) -> String {
  let value = value.trim();
  if value.is_empty() {
    errors.add(field, format!("{} is required.", label));
  }
  value.to_string()
}

fn optional(value: &str) -> Option<String> {
  let value = value.trim();
  (!value.is_empty()).then(|| value.to_string())
}

fn email_field(errors: &mut ValidationErrors, value: &str) -> String {
  let value = value.trim();
  if value.is_empty() {
    errors.add("email", "Email is required.");
  } else if !is_valid_email(value) {
    errors.add("email", "Enter a valid email address.");
  }
  value.to_string()
}

fn date_field(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) -> Option<NaiveDate> {
  let value = value.trim();
  if value.is_empty() {
    errors.add(field, format!("{} date is required.", label));
    return None;
  }
  match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    Ok(date) => Some(date),
    Err(_) => {
      errors.add(field, "Use the format YYYY-MM-DD.");
      None
    }
  }
}

fn ranged_int(
  errors: &mut ValidationErrors,
  field: &'static str,
  value: &str,
  default: Option<i64>,
  min: i64,
  max: i64,
  label: &str,
) -> i64 {
  let value = value.trim();
  let parsed = if value.is_empty() { default } else { value.parse::<i64>().ok() };
  match parsed {
    Some(n) if (min..=max).contains(&n) => n,
    Some(_) => {
      errors.add(field, format!("{} must be between {} and {}.", label, min, max));
      min
    }
    None if value.is_empty() => {
      errors.add(field, format!("{} is required.", label));
      min
    }
    None => {
      errors.add(field, format!("{} must be a whole number.", label));
      min
    }
  }
}

// ============================================================================
// Validators
// ============================================================================

/// Validate a booking form. `rooms` are the rooms currently open for booking.
pub fn validate_booking(form: &BookingForm, rooms: &[Room]) -> Result<NewBooking, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let guest_name = required(&mut errors, "guest_name", &form.guest_name, "Full name");
  let email = email_field(&mut errors, &form.email);

  let room_id = match form.room_id.trim().parse::<i64>() {
    Ok(id) if rooms.iter().any(|r| r.id == id) => id,
    Ok(_) => {
      errors.add("room_id", "That room is not available for booking.");
      0
    }
    Err(_) => {
      errors.add("room_id", "Please choose a room.");
      0
    }
  };

  let check_in = date_field(&mut errors, "check_in", &form.check_in, "Check-in");
  let check_out = date_field(&mut errors, "check_out", &form.check_out, "Check-out");
  if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
    if check_out <= check_in {
      errors.add("check_out", "Check-out date must be after check-in date.");
    }
  }

  let adults = ranged_int(&mut errors, "adults", &form.adults, None, MIN_ADULTS, MAX_ADULTS, "Adults");
  let children = ranged_int(&mut errors, "children", &form.children, Some(0), 0, MAX_CHILDREN, "Children");

  match (check_in, check_out) {
    (Some(check_in), Some(check_out)) if errors.is_empty() => Ok(NewBooking {
      guest_name,
      email,
      phone: optional(&form.phone),
      room_id,
      check_in,
      check_out,
      adults,
      children,
      special_requests: optional(&form.special_requests),
    }),
    _ => Err(errors),
  }
}

pub fn validate_contact(form: &ContactForm) -> Result<NewContact, ValidationErrors> {
  let mut errors = ValidationErrors::new();
  let contact = NewContact {
    name: required(&mut errors, "name", &form.name, "Name"),
    email: email_field(&mut errors, &form.email),
    subject: required(&mut errors, "subject", &form.subject, "Subject"),
    message: required(&mut errors, "message", &form.message, "Message"),
  };
  errors.into_result(contact)
}

pub fn validate_room(form: &RoomForm) -> Result<RoomDraft, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let name = required(&mut errors, "name", &form.name, "Room name");
  let description = required(&mut errors, "description", &form.description, "Description");

  let price_cents = if form.price.trim().is_empty() {
    errors.add("price", "Price per night is required.");
    0
  } else {
    match parse_price_cents(&form.price) {
      Some(cents) if cents > 0 => cents,
      Some(_) => {
        errors.add("price", "Price must be greater than zero.");
        0
      }
      None => {
        errors.add("price", "Enter a price like 299 or 299.00.");
        0
      }
    }
  };

  let max_occupancy = ranged_int(
    &mut errors,
    "max_occupancy",
    &form.max_occupancy,
    None,
    1,
    MAX_OCCUPANCY,
    "Max occupancy",
  );

  let draft = RoomDraft {
    name,
    description,
    price_cents,
    max_occupancy,
    room_size: optional(&form.room_size),
    bed_type: optional(&form.bed_type),
    amenities: form.amenities.trim().to_string(),
    image_url: optional(&form.image_url),
    is_available: form.available(),
  };
  errors.into_result(draft)
}

pub fn validate_user(form: &UserForm) -> Result<ValidUser, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let name = required(&mut errors, "name", &form.name, "Name");
  let email = email_field(&mut errors, &form.email);

  if form.password.is_empty() {
    errors.add("password", "Password is required.");
  } else if form.password.chars().count() < MIN_PASSWORD_LEN {
    errors.add(
      "password",
      format!("Password must be at least {} characters.", MIN_PASSWORD_LEN),
    );
  }
  if form.confirm_password != form.password {
    errors.add("confirm_password", "Passwords must match.");
  }

  errors.into_result(ValidUser {
    name,
    email,
    password: form.password.clone(),
    is_admin: form.is_admin.is_some(),
  })
}
