use dotenv::dotenv;
use tracing::{error, info, warn};
use veloria_backend::app::app::App;
use veloria_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Environment first, the logger reads LOG_DIR and the levels from it
    let env_loaded = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            if let Err(init_err) = Logger::console_only() {
                eprintln!("Failed to initialize console logging: {}", init_err);
            }
            warn!("File logging unavailable, logging to console only: {}", e);
            None
        }
    };

    info!("🚀 Starting Veloria Backend");
    match env_loaded {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
