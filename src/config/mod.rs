//! Configuration module for the boutique backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for the admin API (product editor, visitor stats)
    pub admin_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory holding persisted cart blobs, one scope per client session
    pub cart_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_psk = env::var("LEENAS_API_PSK").ok();

        let db_path = env::var("LEENAS_DB_PATH")
            .unwrap_or_else(|_| "./data/boutique.sqlite".to_string())
            .into();

        let cart_path = env::var("LEENAS_CART_PATH")
            .unwrap_or_else(|_| "./data/carts".to_string())
            .into();

        let bind_addr = env::var("LEENAS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid LEENAS_BIND_ADDR format");

        let log_level = env::var("LEENAS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_psk,
            db_path,
            cart_path,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("LEENAS_API_PSK");
        env::remove_var("LEENAS_DB_PATH");
        env::remove_var("LEENAS_CART_PATH");
        env::remove_var("LEENAS_BIND_ADDR");
        env::remove_var("LEENAS_LOG_LEVEL");

        let config = Config::from_env();

        assert!(config.admin_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/boutique.sqlite"));
        assert_eq!(config.cart_path, PathBuf::from("./data/carts"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
    }
}
