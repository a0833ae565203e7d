//! Application configuration.
//!
//! Every value is resolved with the same priority: `config.toml` > environment
//! (including a `.env` file) > built-in default.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::paths;

// ==================== File layout ====================

/// Configuration file structure for config.toml
#[derive(Default, Deserialize)]
struct FileConfig {
    server: Option<ServerSection>,
    database: Option<DatabaseSection>,
    session: Option<SessionSection>,
    mail: Option<MailSection>,
    admin: Option<AdminSection>,
    site: Option<SiteSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionSection {
    remember_days: Option<i64>,
    default_hours: Option<i64>,
    secure_cookies: Option<bool>,
}

#[derive(Default, Deserialize)]
struct MailSection {
    server: Option<String>,
    port: Option<u16>,
    use_tls: Option<bool>,
    username: Option<String>,
    password: Option<String>,
    default_sender: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Default, Deserialize)]
struct AdminSection {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SiteSection {
    seed_sample_data: Option<bool>,
}

// ==================== Defaults ====================

/// Server address to bind to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Server port
pub const DEFAULT_PORT: u16 = 5000;

/// Lifetime of a "remember me" session
pub const DEFAULT_REMEMBER_DAYS: i64 = 30;

/// Server-side lifetime of a browser-session login
pub const DEFAULT_SESSION_HOURS: i64 = 12;

/// Accepted range for `remember_days`
pub const REMEMBER_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=365;

/// Accepted range for `default_hours`
pub const SESSION_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=720;

/// SMTP defaults (STARTTLS submission port)
pub const DEFAULT_MAIL_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_MAIL_PORT: u16 = 587;
pub const DEFAULT_MAIL_SENDER: &str = "noreply@oasishotel.com";
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

/// Display name used when the bootstrap admin has none configured
pub const DEFAULT_ADMIN_NAME: &str = "Hotel Manager";

// ==================== Resolved config ====================

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Full bind address, e.g. `0.0.0.0:5000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub remember_days: i64,
    pub default_hours: i64,
    /// Mark cookies `Secure` (enable behind HTTPS)
    pub secure_cookies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            remember_days: DEFAULT_REMEMBER_DAYS,
            default_hours: DEFAULT_SESSION_HOURS,
            secure_cookies: false,
        }
    }
}

/// SMTP settings. Present only when a username is configured.
#[derive(Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    pub password: String,
    pub default_sender: String,
    pub timeout_secs: u64,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("default_sender", &self.default_sender)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Credentials for the bootstrap super-admin
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database_path: PathBuf,
    pub session: SessionConfig,
    pub mail: Option<MailConfig>,
    pub admin: Option<AdminBootstrap>,
    pub seed_sample_data: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

impl Config {
    /// Load configuration from `config.toml`, `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let contents = std::fs::read_to_string(paths::CONFIG_FILE).ok();
        if contents.is_some() {
            tracing::info!("Using configuration from {}", paths::CONFIG_FILE);
        }
        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from optional TOML text and an environment lookup.
    pub fn from_sources(
        toml_text: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = match toml_text {
            Some(text) => toml::from_str(text).map_err(|source| ConfigError::Parse {
                file: paths::CONFIG_FILE.to_string(),
                source,
            })?,
            None => FileConfig::default(),
        };

        let server = file.server.unwrap_or_default();
        let database = file.database.unwrap_or_default();
        let session = file.session.unwrap_or_default();
        let mail = file.mail.unwrap_or_default();
        let admin = file.admin.unwrap_or_default();
        let site = file.site.unwrap_or_default();

        let server = ServerConfig {
            host: pick_string(server.host, &env, "HOST")
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: pick(server.port, &env, "PORT")?.unwrap_or(DEFAULT_PORT),
        };

        let database_path = pick_string(database.path, &env, "DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::default_db_path()));

        let session = SessionConfig {
            remember_days: in_range(
                pick(session.remember_days, &env, "SESSION_REMEMBER_DAYS")?,
                "SESSION_REMEMBER_DAYS",
                REMEMBER_DAYS_RANGE,
            )?
            .unwrap_or(DEFAULT_REMEMBER_DAYS),
            default_hours: in_range(
                pick(session.default_hours, &env, "SESSION_DEFAULT_HOURS")?,
                "SESSION_DEFAULT_HOURS",
                SESSION_HOURS_RANGE,
            )?
            .unwrap_or(DEFAULT_SESSION_HOURS),
            secure_cookies: pick_flag(session.secure_cookies, &env, "SECURE_COOKIES")?
                .unwrap_or(false),
        };

        let mail = match pick_string(mail.username, &env, "MAIL_USERNAME") {
            Some(username) => Some(MailConfig {
                server: pick_string(mail.server, &env, "MAIL_SERVER")
                    .unwrap_or_else(|| DEFAULT_MAIL_SERVER.to_string()),
                port: pick(mail.port, &env, "MAIL_PORT")?.unwrap_or(DEFAULT_MAIL_PORT),
                use_tls: pick_flag(mail.use_tls, &env, "MAIL_USE_TLS")?.unwrap_or(true),
                username,
                password: pick_string(mail.password, &env, "MAIL_PASSWORD").unwrap_or_default(),
                default_sender: pick_string(mail.default_sender, &env, "MAIL_DEFAULT_SENDER")
                    .unwrap_or_else(|| DEFAULT_MAIL_SENDER.to_string()),
                timeout_secs: pick(mail.timeout_secs, &env, "MAIL_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_MAIL_TIMEOUT_SECS),
            }),
            None => None,
        };

        let admin = match (
            pick_string(admin.email, &env, "ADMIN_EMAIL"),
            pick_string(admin.password, &env, "ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                email,
                password,
                name: pick_string(admin.name, &env, "ADMIN_NAME")
                    .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
            }),
            _ => None,
        };

        let seed_sample_data =
            pick_flag(site.seed_sample_data, &env, "SEED_SAMPLE_DATA")?.unwrap_or(true);

        Ok(Self {
            server,
            database_path,
            session,
            mail,
            admin,
            seed_sample_data,
        })
    }
}

// ==================== Resolution helpers ====================

fn pick_string(
    file_value: Option<String>,
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<String> {
    file_value
        .or_else(|| env(key))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn pick<T: FromStr>(
    file_value: Option<T>,
    env: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    if file_value.is_some() {
        return Ok(file_value);
    }
    match env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(None),
    }
}

fn in_range(
    value: Option<i64>,
    key: &'static str,
    range: std::ops::RangeInclusive<i64>,
) -> Result<Option<i64>, ConfigError> {
    match value {
        Some(v) if !range.contains(&v) => Err(ConfigError::InvalidValue {
            key,
            value: v.to_string(),
        }),
        other => Ok(other),
    }
}

/// Flags accept `true/on/1` and `false/off/0` from the environment
fn pick_flag(
    file_value: Option<bool>,
    env: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    if file_value.is_some() {
        return Ok(file_value);
    }
    match env(key).map(|v| v.trim().to_lowercase()) {
        Some(raw) => match raw.as_str() {
            "true" | "on" | "1" => Ok(Some(true)),
            "false" | "off" | "0" | "" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue { key, value: raw }),
        },
        None => Ok(None),
    }
}
