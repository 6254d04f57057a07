//! Sideline Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use sideline_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[server]\nport = 5001").unwrap();
//! assert_eq!(config.server.port, 5001);
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [database]
//! path = "data/sideline.db"
//!
//! [social]
//! enabled = true
//! ```

mod error;

pub use error::{ConfigError, Result};

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Social media mirror settings
    pub social: SocialConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Origins allowed by CORS; empty means same-origin only
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path; `:memory:` keeps everything in RAM
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/sideline.db".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Social media mirror settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Whether the background Reddit mirror runs at all
    pub enabled: bool,
    /// Subreddits polled for top posts
    pub subreddits: Vec<String>,
    /// Search terms polled across all of Reddit
    pub search_terms: Vec<String>,
    /// Seconds between background refreshes
    pub refresh_interval_secs: u64,
    /// Seconds a cached feed stays valid
    pub cache_ttl_secs: u64,
    /// User agent sent to the Reddit API
    pub user_agent: String,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            subreddits: vec![
                "WomensSoccer".to_string(),
                "NWSL".to_string(),
                "BarclaysWSL".to_string(),
                "Lionesses".to_string(),
            ],
            search_terms: vec![
                "women's football".to_string(),
                "women's soccer".to_string(),
                "WSL".to_string(),
                "NWSL".to_string(),
                "UWCL women".to_string(),
            ],
            refresh_interval_secs: 900,
            cache_ttl_secs: 1800,
            user_agent: "sideline/0.3 (analytics mirror)".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.database.path.is_empty() {
            return Err(ConfigError::Invalid("database.path is empty".to_string()));
        }

        if self.social.enabled {
            if self.social.refresh_interval_secs == 0 {
                return Err(ConfigError::Invalid(
                    "social.refresh_interval_secs must be positive".to_string(),
                ));
            }
            if self.social.cache_ttl_secs == 0 {
                return Err(ConfigError::Invalid(
                    "social.cache_ttl_secs must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
