pub mod admin_user_conf;
pub mod app_conf;
pub mod email_conf;
pub mod mongo_conf;
pub mod rate_limit_conf;

pub use admin_user_conf::AdminUserConfig;
pub use app_conf::AppConfig;
pub use email_conf::EmailConfig;
pub use mongo_conf::MongoConfig;
pub use rate_limit_conf::RateLimitConfig;

use std::env;
use std::str::FromStr;
use tracing::{debug, error};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Reads a variable that has no default.
pub(crate) fn required_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| {
        error!("{} environment variable not found", name);
        ConfigError::EnvVarNotFound(name.to_string())
    })
}

pub(crate) fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        debug!("{} not set, using default: {}", name, default);
        default.to_string()
    })
}

/// Parses a variable, falling back to `default` when unset. A set but
/// unparsable value is an error rather than silently defaulted.
pub(crate) fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            error!("Invalid {} value: {:?}", name, raw);
            ConfigError::InvalidValue(format!("Invalid {} value", name))
        }),
        Err(_) => Ok(default),
    }
}
