//! One-shot notices carried across a redirect in a short-lived cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE_NAME: &str = "oasis_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
  Success,
  Error,
  Info,
}

impl FlashKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Success => "success",
      Self::Error => "error",
      Self::Info => "info",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    match s {
      "success" => Some(Self::Success),
      "error" => Some(Self::Error),
      "info" => Some(Self::Info),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
  pub kind: FlashKind,
  pub message: String,
}

impl Flash {
  pub fn success(message: impl Into<String>) -> Self {
    Self { kind: FlashKind::Success, message: message.into() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { kind: FlashKind::Error, message: message.into() }
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self { kind: FlashKind::Info, message: message.into() }
  }

  /// `kind|message`; the cookie jar percent-encodes it on the way out
  fn encode(&self) -> String {
    format!("{}|{}", self.kind.as_str(), self.message)
  }

  fn decode(raw: &str) -> Option<Self> {
    let (kind, message) = raw.split_once('|')?;
    Some(Self {
      kind: FlashKind::parse(kind)?,
      message: message.to_string(),
    })
  }
}

pub fn cookie(flash: &Flash) -> Cookie<'static> {
  Cookie::build((FLASH_COOKIE_NAME, flash.encode()))
    .path("/")
    .http_only(true)
    .max_age(time::Duration::minutes(5))
    .build()
}

/// Redirect that shows `flash` on the next page
pub fn redirect_with(jar: CookieJar, to: &str, flash: Flash) -> Response {
  (jar.add(cookie(&flash)), Redirect::to(to)).into_response()
}

/// Read the pending notice and clear it
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
  let Some(raw) = jar.get(FLASH_COOKIE_NAME).map(|c| c.value().to_string()) else {
    return (jar, None);
  };
  let jar = jar.remove(Cookie::build((FLASH_COOKIE_NAME, "")).path("/"));
  (jar, Flash::decode(&raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_encode_decode() {
    let flash = Flash::success("Booking #4 updated | confirmed");
    let decoded = Flash::decode(&flash.encode()).unwrap();
    assert_eq!(decoded, flash);
  }

  #[test]
  fn test_decode_rejects_garbage() {
    assert!(Flash::decode("nonsense").is_none());
    assert!(Flash::decode("warning|hello").is_none());
  }

  #[test]
  fn test_set_cookie_is_encoded_once() {
    let response = redirect_with(CookieJar::new(), "/admin", Flash::error("Access denied. 100% sure"));
    let header = response
      .headers()
      .get(axum::http::header::SET_COOKIE)
      .unwrap()
      .to_str()
      .unwrap()
      .to_string();
    let raw = header.split(';').next().unwrap().trim_start_matches("oasis_flash=");
    assert!(!raw.contains(' '));
    assert_eq!(urlencoding::decode(raw).unwrap(), "error|Access denied. 100% sure");
  }

  #[test]
  fn test_take_clears_cookie() {
    let jar = CookieJar::new().add(cookie(&Flash::error("Nope")));
    let (jar, flash) = take(jar);
    assert_eq!(flash, Some(Flash::error("Nope")));
    assert!(jar.get(FLASH_COOKIE_NAME).is_none());

    let (_, none) = take(CookieJar::new());
    assert!(none.is_none());
  }
}
