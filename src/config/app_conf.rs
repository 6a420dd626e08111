use std::env;
use tracing::warn;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin, `*` allows any
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Invalid PORT value {raw:?}, using 5000");
                5000
            }),
            Err(_) => 5000,
        };
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());
        AppConfig { host, port, cors_origin }
    }
}
