//! Application state shared by every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_MAIL_TIMEOUT_SECS};
use crate::db::DbPool;
use crate::services::mailer::{DisabledMailer, Mailer, SmtpMailer};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Site database (catalog, inquiries, users, sessions)
    pub db: DbPool,

    /// Guest acknowledgment mail
    pub mailer: Arc<dyn Mailer>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DbPool, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        Self {
            db,
            mailer,
            config: Arc::new(config),
        }
    }

    /// State with the mailer the configuration asks for
    pub fn from_config(db: DbPool, config: Config) -> Self {
        let mailer: Arc<dyn Mailer> = match &config.mail {
            Some(mail) => match SmtpMailer::new(mail) {
                Ok(mailer) => {
                    tracing::info!(server = %mail.server, port = mail.port, "SMTP mail enabled");
                    Arc::new(mailer)
                }
                Err(e) => {
                    tracing::error!("Invalid SMTP settings, mail disabled: {}", e);
                    Arc::new(DisabledMailer)
                }
            },
            None => {
                tracing::info!("MAIL_USERNAME not set, guest emails disabled");
                Arc::new(DisabledMailer)
            }
        };
        Self::new(db, mailer, config)
    }

    /// How long a request waits on the mail server
    pub fn mail_timeout(&self) -> Duration {
        let secs = self
            .config
            .mail
            .as_ref()
            .map_or(DEFAULT_MAIL_TIMEOUT_SECS, |m| m.timeout_secs);
        Duration::from_secs(secs)
    }
}
