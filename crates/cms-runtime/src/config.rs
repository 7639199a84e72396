//! Runtime configuration.
//!
//! Defaults are suitable for development; environment variables override
//! individual values. Validation catches values that would make the runtime
//! misbehave rather than fail fast.

use thiserror::Error;
use tracing::Level;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Capacity of the notification broadcast channel.
    pub notification_capacity: usize,
    /// Whether to load demonstration users and catalog data at startup.
    pub seed_demo_data: bool,
    /// Maximum tracing level, e.g. "info" or "debug".
    pub log_level: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            notification_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
            seed_demo_data: true,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("notification channel capacity must be greater than zero")]
    ZeroNotificationCapacity,
    #[error("unrecognised log level: {0}")]
    InvalidLogLevel(String),
}

impl CmsConfig {
    /// Validate the configuration before wiring the runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_capacity == 0 {
            return Err(ConfigError::ZeroNotificationCapacity);
        }
        self.max_level()?;
        Ok(())
    }

    /// The configured level as a `tracing::Level`.
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Load configuration from the environment on top of the defaults.
    ///
    /// Recognised variables:
    /// - `CMS_NOTIFICATION_CAPACITY`: broadcast channel capacity
    /// - `CMS_SEED_DEMO_DATA`: "0" or "false" disables demo seeding
    /// - `CMS_LOG_LEVEL`: maximum tracing level
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(capacity) = std::env::var("CMS_NOTIFICATION_CAPACITY") {
            if let Ok(value) = capacity.parse() {
                config.notification_capacity = value;
            }
        }
        if let Ok(seed) = std::env::var("CMS_SEED_DEMO_DATA") {
            config.seed_demo_data = !matches!(seed.as_str(), "0" | "false" | "no");
        }
        if let Ok(level) = std::env::var("CMS_LOG_LEVEL") {
            config.log_level = level;
        }
        config
    }
}
