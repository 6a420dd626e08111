use crate::config::rate_limit_conf::RateLimitConfig;
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::rate_limiter::RateLimiter;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::warn;

/// Per-client limiter for the public submission routes.
pub struct RateLimitState {
    pub limiter: RateLimiter,
}

impl RateLimitState {
    pub fn new(config: &RateLimitConfig) -> Self {
        RateLimitState {
            limiter: RateLimiter::new(config.max_requests, config.window()),
        }
    }
}

pub async fn rate_limit(
    State(state): State<Arc<RateLimitState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_ip(&req);
    if let Err(wait) = state.limiter.check(client) {
        let retry_after = wait.as_secs().max(1);
        warn!(client = %client, path = %req.uri().path(), retry_after, "Rate limit exceeded");
        let mut response = HandlerError::new(
            HandlerErrorKind::TooManyRequests,
            "Too many requests, please try again later",
        )
        .into_response();
        response.headers_mut().insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return response;
    }
    next.run(req).await
}

/// First `X-Forwarded-For` hop if it is an address, else the peer address.
/// Requests with neither share the unspecified address.
fn client_ip(req: &Request<Body>) -> IpAddr {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());
    forwarded
        .or_else(|| req.extensions().get::<ConnectInfo<SocketAddr>>().map(|ConnectInfo(addr)| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), IpAddr::from([203, 0, 113, 7]));
    }

    #[test]
    fn test_client_ip_ignores_garbage_forwarded_header() {
        let mut req = Request::builder()
            .header("x-forwarded-for", "not-an-ip")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut().insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_ip(&req), IpAddr::from([192, 0, 2, 1]));
    }

    #[test]
    fn test_client_ip_without_peer() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
