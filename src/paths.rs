//! Project path functions - single source of truth for file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated instances side by side:
//! ```bash
//! DATA_DIR=data/staging PORT=5001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Default SQLite database path
pub fn default_db_path() -> String {
    format!("{}/oasis.db", data_dir())
}

/// Static assets directory (served under /static)
pub const STATIC_DIR: &str = "static";

/// Optional config file, read from the working directory
pub const CONFIG_FILE: &str = "config.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_default() {
        // OnceLock initializes once, so only the shape is checked here
        assert!(!data_dir().is_empty());
    }

    #[test]
    fn test_default_db_path_format() {
        assert!(default_db_path().ends_with("/oasis.db"));
    }
}
