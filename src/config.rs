//! Configuration management for the Rental House server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Tabular equipment feed (read-only document source)
#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// URL of the character-delimited catalog export
    pub url: String,
    /// Seconds between catalog polls while subscribers are attached
    pub poll_interval_secs: u64,
}

/// Image-folder listing service (name -> URL mapping)
#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    pub manifest_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: String,
    pub smtp_from_name: Option<String>,
    pub smtp_use_tls: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Equipment manager who receives booking inquiries
    pub manager_email: String,
    /// External service that turns a booking payload into a PDF document
    pub pdf_service_url: String,
    /// Base URL used to build confirmation links embedded in emails
    pub public_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    /// Connection URL; empty disables Redis and keeps carts in memory
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub feed: FeedConfig,
    pub images: ImagesConfig,
    pub email: EmailConfig,
    pub booking: BookingConfig,
    #[serde(default)]
    pub redis: RedisConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix RENTALHOUSE_)
            .add_source(
                Environment::with_prefix("RENTALHOUSE")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override Redis URL from REDIS_URL env var if present
            .set_override_option("redis.url", env::var("REDIS_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            poll_interval_secs: 10,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_from: "noreply@rentalhouse.local".to_string(),
            smtp_from_name: Some("Rental House".to_string()),
            smtp_use_tls: true,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: String::new() }
    }
}
