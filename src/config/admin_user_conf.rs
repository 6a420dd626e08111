use std::env;
use serde::{Serialize, Deserialize};
use crate::config::ConfigError;

/// Credentials checked by the admin Basic-auth middleware.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminUserConfig {
    pub username: String,
    pub password: String,
}

impl AdminUserConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AdminUserConfig {
            username: env::var("ADMIN_USERNAME").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_USERNAME".to_string()))?,
            password: env::var("ADMIN_PASSWORD").map_err(|_| ConfigError::EnvVarNotFound("ADMIN_PASSWORD".to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        AdminUserConfig {
            username: "admin".to_string(),
            password: "changeme123".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError("Admin username cannot be empty".to_string()));
        }
        // A colon would make the Basic credential ambiguous
        if self.username.contains(':') {
            return Err(ConfigError::ValidationError("Admin username cannot contain ':'".to_string()));
        }
        if self.password.len() < 8 {
            return Err(ConfigError::ValidationError("Admin password must be at least 8 characters".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AdminUserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_test_config() {
        assert!(AdminUserConfig::from_test_env().validate().is_ok());
    }

    #[test]
    fn test_validate_short_password() {
        let mut config = AdminUserConfig::from_test_env();
        config.password = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_colon_in_username() {
        let mut config = AdminUserConfig::from_test_env();
        config.username = "ad:min".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", AdminUserConfig::from_test_env());
        assert!(!rendered.contains("changeme123"));
        assert!(rendered.contains("REDACTED"));
    }
}
