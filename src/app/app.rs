use crate::config::{AdminUserConfig, AppConfig, EmailConfig, MongoConfig, RateLimitConfig};
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::middlewares::rate_limit_middleware::RateLimitState;
use crate::repository::booking_repo::{BookingRepository, MongoBookingRepository};
use crate::repository::contact_repo::{ContactRepository, MongoContactRepository};
use crate::repository::project_repo::{MongoProjectRepository, ProjectRepository};
use crate::router::{api_router, AppState};
use crate::service::booking_service::BookingServiceImpl;
use crate::service::contact_service::ContactServiceImpl;
use crate::service::notification_service::{DisabledNotifier, EmailNotifier, Notifier};
use crate::service::project_service::ProjectServiceImpl;
use crate::util::email::{EmailError, SmtpEmailService};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let mongo_config = MongoConfig::from_env()?;
        let admin_config = AdminUserConfig::from_env()?;
        let rate_limit_config = RateLimitConfig::from_env()?;

        let db = crate::repository::connect(&mongo_config).await?;
        let contact_repo: Arc<dyn ContactRepository> =
            Arc::new(MongoContactRepository::new(&db, &mongo_config.contact_collection));
        let booking_repo: Arc<dyn BookingRepository> =
            Arc::new(MongoBookingRepository::new(&db, &mongo_config.booking_collection));
        let project_repo: Arc<dyn ProjectRepository> =
            Arc::new(MongoProjectRepository::new(&db, &mongo_config.project_collection));

        let notifier = build_notifier();

        let rate_limit_state = Arc::new(RateLimitState::new(&rate_limit_config));
        rate_limit_state.limiter.spawn_pruning();

        let state = AppState {
            contact_service: Arc::new(ContactServiceImpl::new(contact_repo, notifier.clone())),
            booking_service: Arc::new(BookingServiceImpl::new(booking_repo, notifier.clone())),
            project_service: Arc::new(ProjectServiceImpl::new(project_repo, notifier)),
            admin_auth_state: Arc::new(AdminAuthState::new(admin_config)),
            rate_limit_state,
        };

        let router = api_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors_origin)?);

        Ok(App { config, router })
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = SocketAddr::new(self.config.host.parse()?, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

/// SMTP notifier when e-mail is configured, otherwise a notifier that skips sending.
fn build_notifier() -> Arc<dyn Notifier> {
    let email = EmailConfig::from_env()
        .map_err(EmailError::from)
        .and_then(SmtpEmailService::new);
    match email {
        Ok(service) => {
            info!(admin = %service.admin_address(), "E-mail notifications enabled");
            Arc::new(EmailNotifier::new(service))
        }
        Err(e) => {
            warn!("E-mail notifications disabled: {}", e);
            Arc::new(DisabledNotifier)
        }
    }
}

fn cors_layer(origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if origin.trim() == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        Ok(layer.allow_origin(HeaderValue::from_str(origin.trim())?))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_wildcard_and_origin() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("https://veloria.studio").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
