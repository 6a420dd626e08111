use std::time::Duration;
use tracing::{debug, info};

use crate::config::{parsed_var, ConfigError};

/// Limits applied to the public submission routes, per client IP.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u64,
}

impl RateLimitConfig {
    /// Reads `RATE_LIMIT_WINDOW_MS` and `RATE_LIMIT_MAX`, both optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading rate limit configuration from environment variables");
        let defaults = RateLimitConfig::default();

        let config = RateLimitConfig {
            window_ms: parsed_var("RATE_LIMIT_WINDOW_MS", defaults.window_ms)?,
            max_requests: parsed_var("RATE_LIMIT_MAX", defaults.max_requests)?,
        };
        debug!("Rate limit: {} requests per {} ms", config.max_requests, config.window_ms);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_ms == 0 {
            return Err(ConfigError::ValidationError("Rate limit window must be greater than 0".to_string()));
        }
        if self.max_requests == 0 {
            return Err(ConfigError::ValidationError("Rate limit max must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            window_ms: 15 * 60 * 1000,
            max_requests: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window(), Duration::from_secs(900));
        assert_eq!(config.max_requests, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = RateLimitConfig::default();
        config.max_requests = 0;
        assert!(config.validate().is_err());

        let mut config = RateLimitConfig::default();
        config.window_ms = 0;
        assert!(config.validate().is_err());
    }

    // Only test in the crate touching RATE_LIMIT_*
    #[test]
    fn test_from_env_parses_and_rejects_garbage() {
        std::env::set_var("RATE_LIMIT_WINDOW_MS", "60000");
        std::env::set_var("RATE_LIMIT_MAX", " 5 ");
        let config = RateLimitConfig::from_env().unwrap();
        assert_eq!(config.window(), Duration::from_secs(60));
        assert_eq!(config.max_requests, 5);

        std::env::set_var("RATE_LIMIT_MAX", "lots");
        assert!(matches!(RateLimitConfig::from_env(), Err(ConfigError::InvalidValue(_))));

        std::env::remove_var("RATE_LIMIT_WINDOW_MS");
        std::env::remove_var("RATE_LIMIT_MAX");
        assert_eq!(RateLimitConfig::from_env().unwrap().max_requests, 100);
    }
}
