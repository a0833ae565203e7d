//! Public contact form.

use askama::Template;
use axum::{
  extract::State,
  response::{IntoResponse, Response},
  Form,
};
use axum_extra::extract::CookieJar;

use super::flash::{self, Flash};
use super::render;
use crate::db::{inquiries, try_lock};
use crate::error::{AppError, ValidationErrors};
use crate::filters;
use crate::services::notifications;
use crate::state::AppState;
use crate::validation::{validate_contact, ContactForm};

const SENT: &str = "Your message has been sent successfully! We will get back to you soon.";
const SEND_FAILED: &str = "An error occurred while sending your message. Please try again.";

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
  pub form: ContactForm,
  pub errors: ValidationErrors,
  pub error: Option<String>,
  pub flash: Option<Flash>,
}

/// GET /contact
pub async fn contact_page(jar: CookieJar) -> Result<Response, AppError> {
  let (jar, flash) = flash::take(jar);
  let template = ContactTemplate {
    form: ContactForm::default(),
    errors: ValidationErrors::new(),
    error: None,
    flash,
  };
  Ok((jar, render(&template)?).into_response())
}

/// POST /contact
pub async fn contact_submit(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
  let contact = match validate_contact(&form) {
    Ok(contact) => contact,
    Err(errors) => {
      let template = ContactTemplate {
        form,
        errors,
        error: None,
        flash: None,
      };
      return Ok(render(&template)?.into_response());
    }
  };

  let saved = {
    let conn = try_lock(&state.db)?;
    inquiries::insert_contact(&conn, &contact)
  };
  match saved {
    Ok(id) => tracing::info!(contact_id = id, "Contact inquiry received"),
    Err(e) => {
      tracing::error!("Failed to save contact inquiry: {}", e);
      let template = ContactTemplate {
        form,
        errors: ValidationErrors::new(),
        error: Some(SEND_FAILED.to_string()),
        flash: None,
      };
      return Ok(render(&template)?.into_response());
    }
  }

  let email = notifications::contact_acknowledgment(&contact);
  notifications::deliver(&*state.mailer, email, state.mail_timeout()).await;

  Ok(flash::redirect_with(jar, "/contact", Flash::success(SENT)))
}
