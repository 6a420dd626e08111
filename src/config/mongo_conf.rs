use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info};

use crate::config::{parsed_var, required_var, var_or, ConfigError};

/// Connection settings and collection names for the three record kinds.
#[derive(Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Only needed when the URI carries no credentials
    pub username: Option<String>,
    pub password: Option<String>,
    pub contact_collection: String,
    pub booking_collection: String,
    pub project_collection: String,
    pub pool_size: u32,
    pub connection_timeout_secs: u64,
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("contact_collection", &self.contact_collection)
            .field("booking_collection", &self.booking_collection)
            .field("project_collection", &self.project_collection)
            .field("pool_size", &self.pool_size)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl MongoConfig {
    /// `MONGO_URI` and `MONGO_DATABASE` are required, everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let defaults = MongoConfig::default();

        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            contact_collection: var_or("MONGO_CONTACT_COLLECTION", &defaults.contact_collection),
            booking_collection: var_or("MONGO_BOOKING_COLLECTION", &defaults.booking_collection),
            project_collection: var_or("MONGO_PROJECT_COLLECTION", &defaults.project_collection),
            pool_size: parsed_var("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parsed_var("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        debug!(config = ?config, "MongoDB configuration");

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        MongoConfig {
            database: "veloria_test".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
            ..MongoConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| Err(ConfigError::ValidationError(message.to_string()));

        if self.uri.trim().is_empty() {
            return invalid("MongoDB URI cannot be empty");
        }
        if self.database.trim().is_empty() {
            return invalid("MongoDB database cannot be empty");
        }
        let collections = [&self.contact_collection, &self.booking_collection, &self.project_collection];
        if collections.iter().any(|name| name.trim().is_empty()) {
            return invalid("MongoDB collection names cannot be empty");
        }
        if self.pool_size == 0 {
            return invalid("MongoDB pool size must be greater than 0");
        }
        if self.connection_timeout_secs == 0 {
            return invalid("MongoDB connection timeout must be greater than 0");
        }
        // Credentials come as a pair
        if self.username.is_some() != self.password.is_some() {
            return invalid("MONGO_USERNAME and MONGO_PASSWORD must be set together");
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "veloria".to_string(),
            username: None,
            password: None,
            contact_collection: "contacts".to_string(),
            booking_collection: "bookings".to_string(),
            project_collection: "projects".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
