use std::env;
use std::fmt;
use std::time::Duration;

use crate::session::ExpansionPolicy;

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the advisor client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub service: ServiceConfig,
    pub session: SessionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url =
            env::var("ADVISOR_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let timeout_secs = env::var("ADVISOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidTimeout)?;

        let expansion_policy = match env::var("ADVISOR_EXPANSION") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "single" => ExpansionPolicy::Single,
                "multi" | "independent" => ExpansionPolicy::Independent,
                _ => return Err(ConfigError::InvalidExpansionPolicy { value }),
            },
            Err(_) => ExpansionPolicy::Single,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            service: ServiceConfig {
                base_url,
                timeout_secs,
            },
            session: SessionConfig { expansion_policy },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for reaching the external recommendation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Upper bound on one submission; a slower service reads as a failure.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-session behavior switches.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub expansion_policy: ExpansionPolicy,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout,
    InvalidExpansionPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout => {
                write!(f, "ADVISOR_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidExpansionPolicy { value } => {
                write!(
                    f,
                    "ADVISOR_EXPANSION must be 'single' or 'multi', got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
