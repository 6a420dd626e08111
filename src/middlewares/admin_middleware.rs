use crate::config::admin_user_conf::AdminUserConfig;
use crate::util::error::{HandlerError, HandlerErrorKind};
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::sync::Arc;
use tracing::{debug, warn};

const CHALLENGE: &str = "Basic realm=\"Veloria Admin\"";

pub struct AdminAuthState {
    pub credentials: AdminUserConfig,
}

impl AdminAuthState {
    pub fn new(credentials: AdminUserConfig) -> Self {
        AdminAuthState { credentials }
    }

    fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so a wrong username costs the same as a wrong password
        let user_ok = constant_time_eq(username.as_bytes(), self.credentials.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.credentials.password.as_bytes());
        user_ok & pass_ok
    }
}

/// Authenticated admin, available to handlers as a request extension.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
}

pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    let Some((username, password)) = auth_header.and_then(parse_basic_auth) else {
        debug!(path = %req.uri().path(), "Admin request without usable Basic credentials");
        return unauthorized("Authentication required");
    };

    if !state.verify(&username, &password) {
        warn!(username = %username, path = %req.uri().path(), "Rejected admin credentials");
        return unauthorized("Invalid credentials");
    }

    req.extensions_mut().insert(AdminIdentity { username });
    next.run(req).await
}

/// Decodes `Basic <base64(user:pass)>`. The password may itself contain ':'.
pub fn parse_basic_auth(header: &str) -> Option<(String, String)> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}

fn unauthorized(message: &str) -> Response {
    let mut response = HandlerError::new(HandlerErrorKind::Unauthorized, message).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_parse_basic_auth() {
        assert_eq!(
            parse_basic_auth(&encode("admin:s3cret:with:colons")),
            Some(("admin".to_string(), "s3cret:with:colons".to_string()))
        );
        assert_eq!(
            parse_basic_auth(&format!("basic {}", STANDARD.encode("a:b"))),
            Some(("a".to_string(), "b".to_string()))
        );
    }

    #[test]
    fn test_parse_basic_auth_rejects_malformed() {
        assert_eq!(parse_basic_auth("Bearer abc.def"), None);
        assert_eq!(parse_basic_auth("Basic !!!notbase64"), None);
        assert_eq!(parse_basic_auth(&encode("no-colon")), None);
        assert_eq!(parse_basic_auth("Basic"), None);
    }

    #[test]
    fn test_verify() {
        let state = AdminAuthState::new(AdminUserConfig::from_test_env());
        assert!(state.verify("admin", "changeme123"));
        assert!(!state.verify("admin", "changeme12"));
        assert!(!state.verify("root", "changeme123"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = unauthorized("Authentication required");
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], CHALLENGE);
    }
}
