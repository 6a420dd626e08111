pub mod email;
pub mod email_template;
pub mod error;
pub mod logger;
pub mod rate_limiter;
pub mod validation;
