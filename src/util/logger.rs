use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console plus daily rolling files. Dropping the logger flushes and stops
/// the file writers, so keep it alive for the whole process.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging()?;
        Ok(Logger { guards })
    }

    /// Console-only fallback when the log directory is unusable. Fails if a
    /// global subscriber is already installed.
    pub fn console_only() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing_subscriber::fmt()
            .with_env_filter(console_filter())
            .with_target(true)
            .try_init()
    }

    fn setup_logging() -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let error_dir = format!("{}/error", log_dir);
        std::fs::create_dir_all(&error_dir)?;

        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_file_log_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let (general, general_guard) = non_blocking(rolling::daily(&log_dir, "veloria-backend.log"));
        let (general_json, general_json_guard) = non_blocking(rolling::daily(&log_dir, "veloria-backend.json"));
        let (errors, errors_guard) = non_blocking(rolling::daily(&error_dir, "veloria-backend-error.log"));
        let (errors_json, errors_json_guard) = non_blocking(rolling::daily(&error_dir, "veloria-backend-error.json"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_ansi(true)
                    .with_filter(console_filter()),
            )
            .with(
                fmt::layer()
                    .with_writer(general)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(general_json)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(errors)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(errors_json)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .try_init()?;

        Ok(vec![general_guard, general_json_guard, errors_guard, errors_json_guard])
    }
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug,veloria_backend=debug,tower_http=debug"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_only_reports_second_init() {
        // The first call may race other tests for the global subscriber
        let _ = Logger::console_only();
        assert!(Logger::console_only().is_err());
    }
}
