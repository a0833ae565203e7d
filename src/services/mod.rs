//! Application services.
//!
//! Outbound mail: the transport and the guest acknowledgments built on it.

pub mod mailer;
pub mod notifications;
